// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [8 Types](https://262.ecma-international.org/5.1/#sec-8)

pub mod object;
pub mod string;
pub mod value;

pub use object::Object;
pub use value::Value;
