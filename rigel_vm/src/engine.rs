// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The tree-walking evaluator: statements in [`evaluator`], expressions in
//! [`expressions`]. Statement lists and loop drivers are iterative;
//! recursion tracks expression nesting and call depth only.

pub mod evaluator;
pub mod expressions;
