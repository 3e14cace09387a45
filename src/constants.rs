// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.
 */

/// The speed of light \[km/s\], for first-order Doppler corrections.
pub(crate) const VEL_C: f64 = 299792.458;

/// The telescope name stamped into reduced 30-m spectra. The merging stage
/// relies on this exact string to recognise single-dish data.
pub(crate) const TELESCOPE_30M: &str = "30M-MRT";
