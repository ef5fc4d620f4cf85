//! Sample py-squared programs with the output they print.

/// A source program and what running it writes to standard output.
#[derive(Clone, Copy, Debug)]
pub struct Sample {
    pub name: &'static str,
    pub source: &'static str,
    pub expected_output: &'static str,
    /// Table slots the program declares.
    pub slots: usize,
}

pub const EMPTY: Sample = Sample {
    name: "empty",
    source: "",
    expected_output: "",
    slots: 0,
};

pub const PRINT_LITERAL: Sample = Sample {
    name: "print_literal",
    source: "print(42)\n",
    expected_output: "42\n",
    slots: 0,
};

pub const DECLARE_AND_PRINT: Sample = Sample {
    name: "declare_and_print",
    source: "x: int = 5\nprint(x)\n",
    expected_output: "5\n",
    slots: 1,
};

pub const REDECLARE: Sample = Sample {
    name: "redeclare",
    source: "x: int = 1\nprint(x)\nx: int = 2\nprint(x)\n",
    expected_output: "1\n2\n",
    slots: 2,
};

pub const NEGATIVE: Sample = Sample {
    name: "negative",
    source: "# extremes\nlow: int = -2147483648\nhigh: int = 2147483647\nprint(low)\nprint(high)\n",
    expected_output: "-2147483648\n2147483647\n",
    slots: 2,
};

pub const COPY_CHAIN: Sample = Sample {
    name: "copy_chain",
    source: "a: int = 7\nb: int = a\nc: int = b\nprint(c)\nprint(a)\n",
    expected_output: "7\n7\n",
    slots: 3,
};

/// Every sample, in a stable order.
pub const ALL: &[Sample] = &[
    EMPTY,
    PRINT_LITERAL,
    DECLARE_AND_PRINT,
    REDECLARE,
    NEGATIVE,
    COPY_CHAIN,
];

/// Source with `count` sequential declarations, each printed once.
pub fn many_declarations(count: usize) -> String {
    let mut src = String::new();
    for i in 0..count {
        src.push_str(&format!("v{i}: int = {i}\nprint(v{i})\n"));
    }
    src
}

/// Expected output of [`many_declarations`].
pub fn many_declarations_output(count: usize) -> String {
    (0..count).map(|i| format!("{i}\n")).collect()
}
