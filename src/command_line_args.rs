// Copyright 2018 Chris Pearce
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::env;
use std::io;
use std::process;

use argparse::{ArgumentParser, Store, StoreTrue};

pub struct Arguments {
    pub input_file_path: String,
    pub output_itemsets_path: String,
    pub min_support: u32,
    pub verbose: bool,
}

pub fn parse_args_or_exit() -> Arguments {
    let mut args: Arguments = Arguments {
        input_file_path: String::new(),
        output_itemsets_path: String::from("frequent_itemsets.txt"),
        min_support: 0,
        verbose: false,
    };

    {
        let mut parser = ArgumentParser::new();
        parser.set_description("Frequent itemset mining with FPGrowth.");

        parser
            .refer(&mut args.input_file_path)
            .add_option(
                &["--input"],
                Store,
                "Input dataset. First line: transaction and item counts. \
                 Then one record per line: transaction id, item, count.",
            )
            .metavar("file_path")
            .required();

        parser
            .refer(&mut args.output_itemsets_path)
            .add_option(
                &["--output"],
                Store,
                "File path in which to store frequent itemsets. \
                 Format: {item, item, ...} : support.",
            )
            .metavar("file_path");

        parser
            .refer(&mut args.min_support)
            .add_option(
                &["--min-support"],
                Store,
                "Minimum itemset support, as a count of occurrences.",
            )
            .metavar("count")
            .required();

        parser
            .refer(&mut args.verbose)
            .add_option(&["--verbose"], StoreTrue, "Log debug output.");

        if env::args().count() == 1 {
            parser.print_help("Usage:", &mut io::stderr()).unwrap();
            process::exit(1);
        }

        match parser.parse_args() {
            Ok(()) => {}
            Err(err) => {
                process::exit(err);
            }
        }
    }

    if args.min_support == 0 {
        eprintln!("Minimum support must be a positive count");
        process::exit(1);
    }

    args
}
