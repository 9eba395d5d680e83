//! Sample Small programs shared by tests and the command-line driver.
//!
//! Each program starts with its `function` line, so the `function` keyword is
//! on line 1 and statement lines match the numbers used in assertions.

use small_ast::Function;

/// Parse a single-function source text, panicking on malformed input.
pub fn parse(src: &str) -> Function {
    match small_parser::parse_function(src) {
        Ok(function) => function,
        Err(err) => panic!("failed to parse test program: {err}\n{src}"),
    }
}

/// Every sample as `(name, source)`.
pub const ALL: [(&str, &str); 8] = [
    ("simple_if", SIMPLE_IF),
    ("unreachable", UNREACHABLE),
    ("sum", SUM),
    ("nested_if", NESTED_IF),
    ("nested_while", NESTED_WHILE),
    ("if_in_while", IF_IN_WHILE),
    ("complex", COMPLEX),
    ("fac", FAC),
];

pub const SIMPLE_IF: &str = "\
function main(a) {
    b = 0 - 5;
    if (b > 0) {
        c = a + 2;
    } else {
        c = b * 2;
    }
    return c;
}
";

pub const UNREACHABLE: &str = "\
function main(b) {
    if (False) {
        c = 5;
    } else {
        c = 0;
    }
    return b + c;
}
";

pub const SUM: &str = "\
function sum(n) {
    i = 0;
    sum = 0;
    while (i < n) {
        sum = sum + i;
        i = i + 1;
    }
    return sum;
}
";

pub const NESTED_IF: &str = "\
function main() {
    y = 5;
    if (b) {
        if (y > 0) {
            y = x - 2;
        } else {
            y = 2 + x;
        }
    } else {}
    return y;
}
";

pub const NESTED_WHILE: &str = "\
function main() {
    sum = 0;
    i = 0;
    while (i < 5) {
        j = 0;
        while (j < 5) {
            sum = sum + 1;
            j = j + 1;
        }
        i = i + 1;
    }
    return sum;
}
";

pub const IF_IN_WHILE: &str = "\
function main() {
    y = 5 * 2;
    while (x > 0) {
        if (b) {
            y = x - 2;
        } else {
            y = x + 2;
        }
    }
    return y;
}
";

pub const COMPLEX: &str = "\
function main() {
    y = 5;
    if (b) {
        if (y > 0) {
            y = x - 2;
            x = 2;
            while (y > 0) {
                y = x - 2;
                y = 2 + x;
            }
            y = 5;
        } else {
            y = 2 + x;
            while (y > 0) {
                y = x - 2;
                y = 2 + x;
            }
        }
    } else {
        if (y > 0) {
            y = x - 2;
            x = 5;
            x = 6;
            while (y > 0) {
                y = x - 2;
                y = 2 + x;
            }
            x = 2;
        } else {
            y = 2 + x;
        }
    }
    if (y > 0) {
        while (y > 0) {
            y = x - 2;
            y = 2 + x;
        }
        y = x - 2;
    } else {
        while (y > 0) {
            y = x - 2;
            y = 2 + x;
            while (y > 0) {
                y = x - 2;
                y = 2 + x;
            }
        }
        y = 2 + x;
    }
    return y;
}
";

pub const FAC: &str = "\
function fac(n) {
    i = 0;
    f = 1;
    while (i < n) {
        i = i + 1;
        f = f * i;
    }
    return f;
}
";
