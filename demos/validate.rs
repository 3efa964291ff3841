// Copyright (c) 2025 Hemashushu <hippospark@gmail.com>, All rights reserved.
//
// This Source Code Form is subject to the terms of
// the Mozilla Public License version 2.0 and additional exceptions.
// For more details, see the LICENSE, LICENSE.additional, and CONTRIBUTING files.

use regex_pcre2::{
    bridge::{regex_compile_global, regex_match_global},
    Regex, Session,
};

pub fn main() {
    typed();
    session();
}

fn typed() {
    let re = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    println!("{}", re.is_match("2025-04-22").unwrap()); // should be true
    println!("{}", re.is_match("04-22").unwrap()); // should be false
}

fn session() {
    // compile once, match many
    let mut session = Session::new();
    regex_compile_global(&mut session, r"^\d{4}-\d{2}-\d{2}$").unwrap();

    for text in ["2025-04-22", "04-22", "1999-12-31"] {
        println!("{}: {}", text, regex_match_global(&session, text));
    }
}
