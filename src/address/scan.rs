/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Scanning many published stealth addresses for the ones owned by a keypair.

use std::collections::BTreeSet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::internal_common::*;
use super::{
    StealthAddress,
    check_stealth_address
};

///Return the indices of every candidate in `candidates` owned by these keys, in ascending order.
///
///Both private keys are validated up front for each curve present in `candidates`.
///After that, candidates that cannot be checked (e.g. an ephemeral key that is not a curve point)
///are skipped, since anyone can publish garbage.
///
///With the `parallel` feature, candidates are checked across all cores.
pub fn scan_stealth_addresses(
    candidates: &[StealthAddress],
    spending_private_key: &PrivateKey,
    viewing_private_key: &PrivateKey
) -> Result<Vec<usize>> {
    let curves: BTreeSet<Curve> = candidates.iter().map(|c| c.curve()).collect();
    for curve in curves {
        spending_private_key.validate(curve)?;
        viewing_private_key.validate(curve)?;
    }

    let check = |(index, candidate): (usize, &StealthAddress)| -> Option<usize> {
        return match check_stealth_address(candidate, spending_private_key, viewing_private_key) {
            Ok(true) => Some(index),
            Ok(false) => None,
            Err(e) => {
                debug!(index, error = %e, "skipping stealth address candidate");
                None
            }
        }
    };

    #[cfg(feature = "parallel")]
    let owned: Vec<usize> = candidates.par_iter().enumerate().filter_map(check).collect();
    #[cfg(not(feature = "parallel"))]
    let owned: Vec<usize> = candidates.iter().enumerate().filter_map(check).collect();

    debug!(candidates = candidates.len(), owned = owned.len(), "stealth address scan finished");
    return Ok(owned)
}
