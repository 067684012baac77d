// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Abstract operation semantics observable from script: conversions,
//! equality, IEEE-754 edges.

use conformance::{eval, eval_bool, eval_number, eval_string};
use rigel_vm::Value;

#[test]
fn ieee_double_addition() {
    assert!(!eval_bool("0.1 + 0.2 === 0.3;"));
    let (_, value) = eval("0.1 + 0.2;");
    let Value::Number(n) = value else {
        panic!("not a number");
    };
    assert_eq!(n.to_bits(), 0x3FD3333333333334);
}

#[test]
fn addition_is_overloaded() {
    assert_eq!(eval_string("[] + [];"), "");
    assert_eq!(eval_string("[] + {};"), "[object Object]");
    // At statement position the brace is a block, not an object literal.
    assert_eq!(eval_number("{} + [];"), 0.0);
    assert_eq!(eval_string("1 + '2';"), "12");
    assert_eq!(eval_number("1 + 2;"), 3.0);
    assert_eq!(eval_string("'' + null;"), "null");
    assert_eq!(eval_string("'' + undefined;"), "undefined");
    assert_eq!(eval_number("true + true;"), 2.0);
}

#[test]
fn equality_table() {
    assert!(eval_bool("null == undefined;"));
    assert!(!eval_bool("null === undefined;"));
    assert!(!eval_bool("NaN == NaN;"));
    assert!(!eval_bool("NaN === NaN;"));
    assert!(eval_bool("0 == '0';"));
    assert!(eval_bool("0 == false;"));
    assert!(eval_bool("'' == false;"));
    assert!(!eval_bool("'' == '0';"));
    assert!(eval_bool("'1' == true;"));
    assert!(!eval_bool("null == 0;"));
    assert!(!eval_bool("undefined == 0;"));
    assert!(eval_bool("0 === -0;"));
    assert!(eval_bool("var o = {}; o == o;"));
    assert!(!eval_bool("var a = {}, b = {}; a == b;"));
    // An object compares to a primitive through ToPrimitive.
    assert!(eval_bool("[5] == 5;"));
    assert!(eval_bool("['x'] == 'x';"));
}

#[test]
fn to_number_string_grammar() {
    assert_eq!(eval_number("+'';"), 0.0);
    assert_eq!(eval_number("+'  42  ';"), 42.0);
    assert_eq!(eval_number("+'0x10';"), 16.0);
    assert_eq!(eval_number("+'1.5e2';"), 150.0);
    assert_eq!(eval_number("+'-Infinity';"), f64::NEG_INFINITY);
    assert!(eval_number("+'banana';").is_nan());
    assert!(eval_number("+'12px';").is_nan());
    assert!(eval_number("+undefined;").is_nan());
    assert_eq!(eval_number("+null;"), 0.0);
    assert_eq!(eval_number("+true;"), 1.0);
    assert_eq!(eval_number("+[];"), 0.0);
    assert_eq!(eval_number("+[7];"), 7.0);
    assert!(eval_number("+[1, 2];").is_nan());
}

#[test]
fn to_string_of_numbers() {
    for (source, expected) in [
        ("String(0)", "0"),
        ("String(-0)", "0"),
        ("String(1)", "1"),
        ("String(-1)", "-1"),
        ("String(1.5)", "1.5"),
        ("String(NaN)", "NaN"),
        ("String(Infinity)", "Infinity"),
        ("String(-Infinity)", "-Infinity"),
        ("String(1e21)", "1e+21"),
        ("String(1e-7)", "1e-7"),
        ("String(123456789)", "123456789"),
        ("String(0.1)", "0.1"),
    ] {
        assert_eq!(eval_string(source), expected, "{source}");
    }
}

#[test]
fn number_round_trips() {
    // ToString(ToNumber(s)) == s for canonical spellings.
    for s in ["0", "1", "-1", "1.5", "NaN", "Infinity", "-Infinity"] {
        let source = format!("String(Number('{s}'));");
        assert_eq!(eval_string(&source), s);
    }
    // ToNumber(ToString(n)) == n.
    for n in ["0.1", "12345.6789", "5e-324", "1.7976931348623157e308"] {
        let source = format!("Number(String({n})) === {n};");
        assert!(eval_bool(&source), "{n}");
    }
    // -0 stringifies to "0", which reads back as +0.
    assert!(eval_bool("1 / Number(String(-0)) === Infinity;"));
}

#[test]
fn to_boolean_table() {
    assert!(eval_bool("!!' ';"));
    assert!(!eval_bool("!!'';"));
    assert!(!eval_bool("!!0;"));
    assert!(!eval_bool("!!NaN;"));
    assert!(eval_bool("!!{};"));
    assert!(eval_bool("!![];"));
    assert!(!eval_bool("!!null;"));
    assert!(!eval_bool("!!undefined;"));
}

#[test]
fn int32_and_uint32_wrapping() {
    assert_eq!(eval_number("-1 >>> 0;"), 4294967295.0);
    assert_eq!(eval_number("4294967296 | 0;"), 0.0);
    assert_eq!(eval_number("2147483648 | 0;"), -2147483648.0);
    assert_eq!(eval_number("1 << 31;"), -2147483648.0);
    assert_eq!(eval_number("1 << 32;"), 1.0);
    assert_eq!(eval_number("-5 % 2;"), -1.0);
    assert_eq!(eval_number("~~'3.9';"), 3.0);
}

#[test]
fn relational_comparisons() {
    assert!(eval_bool("'a' < 'b';"));
    assert!(eval_bool("'abc' < 'abd';"));
    // Two strings compare by code units; mixed operands numerically.
    assert!(eval_bool("'10' < '9';"));
    assert!(!eval_bool("10 < 9;"));
    assert!(!eval_bool("'10' < 9;"));
    assert!(!eval_bool("NaN < 1;"));
    assert!(!eval_bool("NaN >= 1;"));
    assert!(eval_bool("null >= 0;"));
    assert!(!eval_bool("null > 0;"));
}

#[test]
fn to_primitive_hints() {
    let source = r#"
        var log = [];
        var o = {
            valueOf: function () { log.push('valueOf'); return 3; },
            toString: function () { log.push('toString'); return 'three'; }
        };
        var n = o * 2;
        var s = String(o);
        log.join(',') + '|' + n + '|' + s;
    "#;
    assert_eq!(eval_string(source), "valueOf,toString|6|three");
}

#[test]
fn parse_int_and_float() {
    assert_eq!(eval_number("parseInt('42');"), 42.0);
    assert_eq!(eval_number("parseInt('  -17  ');"), -17.0);
    assert_eq!(eval_number("parseInt('0x1F');"), 31.0);
    assert_eq!(eval_number("parseInt('1F', 16);"), 31.0);
    assert_eq!(eval_number("parseInt('12abc');"), 12.0);
    assert_eq!(eval_number("parseInt('111', 2);"), 7.0);
    assert!(eval_number("parseInt('abc');").is_nan());
    assert!(eval_number("parseInt('', 37);").is_nan());
    assert_eq!(eval_number("parseFloat('3.25rem');"), 3.25);
    assert_eq!(eval_number("parseFloat('-2e2x');"), -200.0);
    assert_eq!(eval_number("parseFloat('Infinity!');"), f64::INFINITY);
    assert!(eval_number("parseFloat('.e3');").is_nan());
    assert!(eval_number("parseFloat('inf');").is_nan());
}

#[test]
fn is_nan_is_finite() {
    assert!(eval_bool("isNaN('x');"));
    assert!(!eval_bool("isNaN('3');"));
    assert!(eval_bool("isFinite('3');"));
    assert!(!eval_bool("isFinite(Infinity);"));
    assert!(!eval_bool("isFinite(NaN);"));
}

#[test]
fn uri_functions() {
    assert_eq!(
        eval_string("encodeURIComponent('a b&c');"),
        "a%20b%26c"
    );
    assert_eq!(eval_string("encodeURI('a b&c');"), "a%20b&c");
    assert_eq!(eval_string("decodeURIComponent('a%20b%26c');"), "a b&c");
    assert_eq!(eval_string("encodeURIComponent('\\u00e9');"), "%C3%A9");
    assert_eq!(eval_string("decodeURIComponent('%C3%A9');"), "é");
}
