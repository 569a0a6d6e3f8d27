/*
 * Copyright © 2026, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

/// syntactic sugar for extracting several typed fields from a [`crate::csv::CsvLine`] at once.
/// This flattens the nested if-let tree that typed positional access would otherwise require:
/// ```
/// use swim_common::{extract_fields, csv::CsvLine};
/// let line = CsvLine::new("MSG,3,,,A04424,,2016/03/11,13:07:05.343");
/// extract_fields! { line ?
///     let msg_type: u64 = [1],
///     let icao24: &str = [4] => {
///         println!("got {} {}", msg_type, icao24);
///     } else {
///         println!("missing common fields in {}", line.line());
///     }
/// }
/// ```
#[macro_export]
macro_rules! extract_fields {
    ($csv:ident ? $( let $var:ident : $vt:ty = [$idx:expr] ),* => $blk:block $( else $else_blk:block )?) => {
        if $(
            let Some($var) = $csv.field::<$vt>($idx)
        )&&*
        $blk
        $( else $else_blk )?
    }
}

/// syntactic sugar macro for structopt based command line interface definition
/// ```
/// define_cli! { ARGS [about="my silly prog"] =
///   verbose: bool [help="run verbose", short],
///   path: String  [help="pathname of input"]
/// }
/// ```
#[macro_export]
macro_rules! define_cli {
    ($name:ident [ $( $sopt:ident $(= $sx:expr)? ),* ] = $( $fname:ident : $ftype:ty [ $( $fopt:ident $(= $fx:expr)?),* ] ),* ) => {
        use structopt::StructOpt;
        use lazy_static::lazy_static;

        #[derive(StructOpt)]
        #[structopt( $( $sopt $(=$sx)? ),* )]
        struct CliOpts {
            $(
                #[structopt( $( $fopt $(=$fx)? ),* )]
                $fname : $ftype,
            )*
        }
        lazy_static! { static ref $name: CliOpts = CliOpts::from_args(); }
    }
}
