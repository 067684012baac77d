// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intrinsic behavior: the object model seen through the §15 library.

use conformance::{eval_bool, eval_number, eval_string, eval_throws};

#[test]
fn array_length_invariant() {
    assert_eq!(eval_number("var a = []; a[2] = 1; a.length;"), 3.0);
    assert_eq!(
        eval_string("var a = []; a[2] = 1; a.length = 1; typeof a[2];"),
        "undefined"
    );
    assert_eq!(eval_number("var a = [1, 2, 3]; a.length = 1; a.length;"), 1.0);
    assert_eq!(eval_number("[1, 2, 3].length;"), 3.0);
    assert_eq!(eval_number("[1, , 3].length;"), 3.0);
    assert_eq!(eval_number("new Array(7).length;"), 7.0);
    eval_throws("new Array(-1);", "RangeError");
    eval_throws("var a = []; a.length = 1.5;", "RangeError");
}

#[test]
fn array_mutators() {
    assert_eq!(eval_string("var a = [1, 2]; a.push(3, 4); a.join('-');"), "1-2-3-4");
    assert_eq!(eval_number("[1, 2, 3].pop();"), 3.0);
    assert_eq!(eval_number("var a = [1, 2, 3]; a.pop(); a.length;"), 2.0);
    assert_eq!(eval_number("[9, 1].shift();"), 9.0);
    assert_eq!(eval_string("var a = [2, 3]; a.unshift(0, 1); a.join();"), "0,1,2,3");
    assert_eq!(eval_string("[3, 1, 2].sort().join();"), "1,2,3");
    assert_eq!(eval_string("[10, 9, 1].sort().join();"), "1,10,9");
    assert_eq!(
        eval_string("[10, 9, 1].sort(function (a, b) { return a - b; }).join();"),
        "1,9,10"
    );
    assert_eq!(eval_string("var a = [1, 2, 3]; a.reverse(); a.join();"), "3,2,1");
    assert_eq!(
        eval_string("var a = [1, 2, 3, 4]; var r = a.splice(1, 2, 'x'); r.join() + '|' + a.join();"),
        "2,3|1,x,4"
    );
}

#[test]
fn array_accessors() {
    assert_eq!(eval_string("[1, 2].concat([3], 4).join();"), "1,2,3,4");
    assert_eq!(eval_string("[1, 2, 3, 4].slice(1, 3).join();"), "2,3");
    assert_eq!(eval_string("[1, 2, 3, 4].slice(-2).join();"), "3,4");
    assert_eq!(eval_number("[1, 2, 3, 2].indexOf(2);"), 1.0);
    assert_eq!(eval_number("[1, 2, 3, 2].lastIndexOf(2);"), 3.0);
    assert_eq!(eval_number("[1, 2].indexOf('1');"), -1.0);
    assert_eq!(eval_string("[1, , 2].join('*');"), "1**2");
}

#[test]
fn array_iteration_methods() {
    assert_eq!(
        eval_string("[1, 2, 3].map(function (x) { return x * 2; }).join();"),
        "2,4,6"
    );
    assert_eq!(
        eval_string("[1, 2, 3, 4].filter(function (x) { return x % 2 === 0; }).join();"),
        "2,4"
    );
    assert_eq!(
        eval_number("[1, 2, 3].reduce(function (a, b) { return a + b; });"),
        6.0
    );
    assert_eq!(
        eval_number("[1, 2, 3].reduce(function (a, b) { return a + b; }, 10);"),
        16.0
    );
    assert_eq!(
        eval_string("['a', 'b'].reduceRight(function (a, b) { return a + b; });"),
        "ba"
    );
    assert!(eval_bool("[2, 4].every(function (x) { return x % 2 === 0; });"));
    assert!(eval_bool("[1, 3, 4].some(function (x) { return x % 2 === 0; });"));
    assert_eq!(
        eval_number("var sum = 0; [1, 2, 3].forEach(function (x) { sum += x; }); sum;"),
        6.0
    );
    eval_throws("[].reduce(function () {});", "TypeError");
    // Holes are skipped, and the index/array arguments arrive.
    assert_eq!(
        eval_string("var seen = []; [1, , 3].forEach(function (x, i) { seen.push(i); }); seen.join();"),
        "0,2"
    );
}

#[test]
fn string_methods() {
    assert_eq!(eval_string("'abc'.charAt(1);"), "b");
    assert_eq!(eval_string("'abc'.charAt(9);"), "");
    assert_eq!(eval_number("'abc'.charCodeAt(0);"), 97.0);
    assert!(eval_number("'abc'.charCodeAt(9);").is_nan());
    assert_eq!(eval_number("'hello'.indexOf('l');"), 2.0);
    assert_eq!(eval_number("'hello'.lastIndexOf('l');"), 3.0);
    assert_eq!(eval_number("'aaa'.indexOf('a', 1);"), 1.0);
    assert_eq!(eval_string("'hello'.slice(1, 3);"), "el");
    assert_eq!(eval_string("'hello'.slice(-3);"), "llo");
    assert_eq!(eval_string("'hello'.substring(3, 1);"), "ll");
    assert_eq!(eval_string("'hello'.substr(1, 3);"), "ell");
    assert_eq!(eval_string("'a,b,,c'.split(',').join('|');"), "a|b||c");
    assert_eq!(eval_number("'abc'.split('').length;"), 3.0);
    assert_eq!(eval_string("'x'.split(undefined).join();"), "x");
    assert_eq!(eval_string("'Mixed Case'.toLowerCase();"), "mixed case");
    assert_eq!(eval_string("'Mixed Case'.toUpperCase();"), "MIXED CASE");
    assert_eq!(eval_string("'  pad  '.trim();"), "pad");
    assert_eq!(eval_string("'\\u00A0x\\u00A0'.trim();"), "x");
    assert_eq!(eval_number("'abc'.length;"), 3.0);
    assert_eq!(eval_string("'abc'[1];"), "b");
    assert_eq!(eval_string("String.fromCharCode(72, 105);"), "Hi");
}

#[test]
fn string_replace_and_match() {
    assert_eq!(eval_string("'a-b-c'.replace('-', '+');"), "a+b-c");
    assert_eq!(eval_string("'a-b-c'.replace(/-/g, '+');"), "a+b+c");
    assert_eq!(
        eval_string("'John Smith'.replace(/(\\w+) (\\w+)/, '$2 $1');"),
        "Smith John"
    );
    assert_eq!(
        eval_string("'abc'.replace('b', function (m) { return m.toUpperCase(); });"),
        "aBc"
    );
    assert_eq!(
        eval_string("'x=1&y=2'.replace(/\\d/g, function (d) { return d * 2; });"),
        "x=2&y=4"
    );
    assert_eq!(eval_string("'aXbXc'.split(/x/i).join();"), "a,b,c");
    assert_eq!(eval_string("'abcabc'.match(/b./)[0];"), "bc");
    assert_eq!(eval_number("'abcabc'.match(/b./g).length;"), 2.0);
    assert_eq!(eval_string("String('no match here'.match(/zz/));"), "null");
    assert_eq!(eval_number("'abc-def'.match(/(\\w+)-(\\w+)/).length;"), 3.0);
}

#[test]
fn regexp_objects() {
    assert!(eval_bool("/ab+c/.test('xabbbcx');"));
    assert!(!eval_bool("/^ab$/.test('xabx');"));
    assert_eq!(eval_string("/a(b)c/.exec('zabcz')[1];"), "b");
    assert_eq!(eval_number("/abc/.exec('zabcz').index;"), 1.0);
    assert_eq!(eval_string("String(/a[/]b/gi);"), "/a[/]b/gi");
    assert!(eval_bool("/abc/g.global && /abc/i.ignoreCase && /abc/m.multiline;"));
    assert_eq!(
        eval_string("var re = /x/g; re.exec('axbx'); re.lastIndex + '';"),
        "2"
    );
    eval_throws("new RegExp('(', '');", "SyntaxError");
    eval_throws("new RegExp('a', 'q');", "SyntaxError");
}

#[test]
fn object_statics() {
    assert_eq!(eval_string("Object.keys({ a: 1, b: 2 }).join();"), "a,b");
    assert!(eval_bool("Object.getPrototypeOf({}) === Object.prototype;"));
    assert!(eval_bool("Object.getPrototypeOf(Object.create(null)) === null;"));
    assert_eq!(
        eval_number("var p = { greet: 1 }; var o = Object.create(p); o.greet;"),
        1.0
    );
    assert!(eval_bool(
        "var d = Object.getOwnPropertyDescriptor({ a: 1 }, 'a'); d.writable && d.enumerable && d.configurable && d.value === 1;"
    ));
    assert_eq!(
        eval_string("Object.getOwnPropertyNames(Object.defineProperty({ a: 1 }, 'h', { value: 2 })).join();"),
        "a,h"
    );
    // Hidden properties stay out of keys and for-in.
    assert_eq!(
        eval_string("Object.keys(Object.defineProperty({ a: 1 }, 'h', { value: 2 })).join();"),
        "a"
    );
}

#[test]
fn define_property_invariants() {
    eval_throws(
        r#"
            var o = {};
            Object.defineProperty(o, 'x', { value: 1 });
            Object.defineProperty(o, 'x', { value: 2 });
        "#,
        "TypeError",
    );
    assert_eq!(
        eval_number(
            r#"
                var o = {};
                Object.defineProperty(o, 'x', { value: 1, writable: true, configurable: true });
                Object.defineProperty(o, 'x', { value: 2 });
                o.x;
            "#
        ),
        2.0
    );
    // Accessors run on get and set.
    assert_eq!(
        eval_number(
            r#"
                var backing = 0;
                var o = {};
                Object.defineProperty(o, 'x', {
                    get: function () { return backing; },
                    set: function (v) { backing = v * 2; }
                });
                o.x = 21;
                o.x;
            "#
        ),
        42.0
    );
    // Object literal accessors behave the same way.
    assert_eq!(
        eval_number("var o = { get x() { return 5; } }; o.x;"),
        5.0
    );
}

#[test]
fn freeze_seal_prevent_extensions() {
    assert!(eval_bool("Object.isFrozen(Object.freeze({ a: 1 }));"));
    assert!(eval_bool("Object.isSealed(Object.seal({}));"));
    assert!(!eval_bool("Object.isExtensible(Object.preventExtensions({}));"));
    assert_eq!(
        eval_number("var o = Object.freeze({ a: 1 }); o.a = 9; o.a;"),
        1.0
    );
    eval_throws(
        "'use strict'; var o = Object.freeze({ a: 1 }); o.a = 9;",
        "TypeError",
    );
    assert_eq!(
        eval_string("var o = Object.preventExtensions({}); o.fresh = 1; typeof o.fresh;"),
        "undefined"
    );
}

#[test]
fn non_writable_prototype_property_blocks_shadowing() {
    let source = r#"
        var proto = {};
        Object.defineProperty(proto, 'x', { value: 1, writable: false });
        var o = Object.create(proto);
        o.x = 2;
        o.x;
    "#;
    assert_eq!(eval_number(source), 1.0);
}

#[test]
fn object_prototype_methods() {
    assert_eq!(eval_string("({}).toString();"), "[object Object]");
    assert_eq!(eval_string("Object.prototype.toString.call([]);"), "[object Array]");
    assert_eq!(eval_string("Object.prototype.toString.call(null);"), "[object Null]");
    assert!(eval_bool("({ a: 1 }).hasOwnProperty('a');"));
    assert!(!eval_bool("({ a: 1 }).hasOwnProperty('toString');"));
    assert!(eval_bool("Object.prototype.isPrototypeOf({});"));
    assert!(eval_bool("({ a: 1 }).propertyIsEnumerable('a');"));
    assert!(!eval_bool("[].propertyIsEnumerable('length');"));
}

#[test]
fn function_prototype_methods() {
    assert_eq!(
        eval_number("function add(a, b) { return a + b; } add.apply(null, [2, 3]);"),
        5.0
    );
    assert_eq!(
        eval_number("function add(a, b) { return a + b; } add.call(null, 2, 3);"),
        5.0
    );
    assert_eq!(
        eval_number(
            "function add(a, b) { return a + b; } var addTwo = add.bind(null, 2); addTwo(3);"
        ),
        5.0
    );
    assert_eq!(
        eval_number(
            "var o = { n: 10, get: function () { return this.n; } }; o.get.call({ n: 3 });"
        ),
        3.0
    );
    assert!(eval_bool(
        "function A() {} var B = A.bind(null); new B() instanceof A;"
    ));
    assert_eq!(eval_number("function f(a, b, c) {} f.length;"), 3.0);
    assert!(eval_bool("(function () {}).toString().indexOf('function') === 0;"));
    assert!(eval_bool("Math.abs.toString().indexOf('native code') > 0;"));
}

#[test]
fn number_methods() {
    assert_eq!(eval_string("(255).toString(16);"), "ff");
    assert_eq!(eval_string("(8).toString(2);"), "1000");
    assert_eq!(eval_string("(-255).toString(16);"), "-ff");
    assert_eq!(eval_string("(3.14159).toFixed(2);"), "3.14");
    assert_eq!(eval_string("(0).toFixed(2);"), "0.00");
    eval_throws("(1).toString(1);", "RangeError");
    eval_throws("(1).toFixed(25);", "RangeError");
    assert!(eval_bool("Number.MAX_VALUE > 1e308;"));
    assert!(eval_bool("Number.MIN_VALUE > 0;"));
    assert!(eval_bool("isNaN(Number.NaN);"));
}

#[test]
fn math_methods() {
    assert_eq!(eval_number("Math.abs(-5);"), 5.0);
    assert_eq!(eval_number("Math.floor(1.7);"), 1.0);
    assert_eq!(eval_number("Math.ceil(1.2);"), 2.0);
    assert_eq!(eval_number("Math.round(2.5);"), 3.0);
    assert_eq!(eval_number("Math.round(-2.5);"), -2.0);
    assert_eq!(eval_number("Math.max(1, 5, 3);"), 5.0);
    assert_eq!(eval_number("Math.min(1, 5, 3);"), 1.0);
    assert_eq!(eval_number("Math.max();"), f64::NEG_INFINITY);
    assert!(eval_number("Math.max(1, NaN);").is_nan());
    assert_eq!(eval_number("Math.pow(2, 10);"), 1024.0);
    assert_eq!(eval_number("Math.sqrt(144);"), 12.0);
    assert!(eval_bool("Math.abs(Math.sin(Math.PI)) < 1e-15;"));
    assert!(eval_bool("Math.E > 2.7 && Math.E < 2.72;"));
    assert!(eval_bool("var r = Math.random(); r >= 0 && r < 1;"));
}

#[test]
fn wrapper_objects() {
    assert_eq!(eval_string("typeof new Number(3);"), "object");
    assert_eq!(eval_number("new Number(3) + 1;"), 4.0);
    assert!(eval_bool("new Boolean(false) ? true : false;"));
    assert_eq!(eval_number("new String('abc').length;"), 3.0);
    assert_eq!(eval_string("new String('abc')[0];"), "a");
    assert!(eval_bool("'abc' == new String('abc');"));
    assert!(!eval_bool("'abc' === new String('abc');"));
}

#[test]
fn error_objects() {
    assert_eq!(eval_string("new Error('boom').message;"), "boom");
    assert_eq!(eval_string("new TypeError('t').name;"), "TypeError");
    assert_eq!(eval_string("String(new RangeError('r'));"), "RangeError: r");
    assert_eq!(eval_string("String(new Error());"), "Error");
    assert!(eval_bool("new SyntaxError('x') instanceof SyntaxError;"));
    assert!(eval_bool("new URIError('x') instanceof Error;"));
}

#[test]
fn date_objects() {
    assert!(eval_bool("Date.now() > 1e12;"));
    assert!(eval_bool("new Date().getTime() > 1e12;"));
    assert_eq!(eval_number("new Date(5000).getTime();"), 5000.0);
    assert_eq!(eval_string("new Date(0).toISOString();"), "1970-01-01T00:00:00.000Z");
    assert!(eval_bool("new Date(0).toString().indexOf('Thu Jan 01 1970') === 0;"));
    eval_throws("Date.prototype.getTime.call({});", "TypeError");
}

#[test]
fn property_order_is_observable() {
    assert_eq!(
        eval_string(
            "var o = {}; o.z = 1; o.a = 2; o.m = 3; delete o.a; o.a = 4; Object.keys(o).join();"
        ),
        "z,m,a"
    );
}
