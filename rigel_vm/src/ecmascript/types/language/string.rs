// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [8.4 The String Type](https://262.ecma-international.org/5.1/#sec-8.4)
//!
//! Strings are finite sequences of UTF-16 code units. The heap interns
//! every string, so a [`JsString`] handle compares by content, and storage
//! as raw code units keeps the spec's index semantics exact (including lone
//! surrogates, which are legal string elements).

/// Handle to an interned string in an interpreter's heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JsString(u32);

impl JsString {
    pub(crate) fn from_index(index: u32) -> Self {
        Self(index)
    }

    pub(crate) fn into_index(self) -> u32 {
        self.0
    }
}

/// ### [7.2 White Space](https://262.ecma-international.org/5.1/#sec-7.2) and
/// [7.3 Line Terminators](https://262.ecma-international.org/5.1/#sec-7.3),
/// over code units, as used by `ToNumber`, `String.prototype.trim` and
/// friends.
pub fn is_trimmable_whitespace(unit: u16) -> bool {
    match unit {
        0x0009 | 0x000A | 0x000B | 0x000C | 0x000D | 0x0020 | 0x00A0 | 0x2028 | 0x2029
        | 0xFEFF => true,
        unit => char::from_u32(unit as u32).is_some_and(|c| c.is_whitespace()),
    }
}
