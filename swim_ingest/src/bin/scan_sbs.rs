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

#![allow(unused)]

use std::fs;
use std::io::{self,BufRead,BufReader};
use anyhow::Result;

use swim_common::define_cli;
use swim_ingest::{Translator, sbs::{SbsConfig,SbsTranslator}};

define_cli! { ARGS [about="replay a captured ADS-B SBS file through the translator"] =
    temp_cs: bool [help="emit positions before identification, with the transponder id as callsign", long],
    path: String [help="pathname of SBS capture file"]
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let file = fs::File::open( &ARGS.path)?;
    let reader = BufReader::new( file);

    let mut translator = SbsTranslator::new( SbsConfig { temp_cs: ARGS.temp_cs });
    let mut n_lines = 0;
    let mut n_tracks = 0;

    for line in reader.lines() {
        let line = line?;
        n_lines += 1;
        for event in translator.translate( line.as_bytes()) {
            n_tracks += 1;
            println!("{event}");
        }
    }

    println!("processed {} lines into {} track events ({} live entries)", n_lines, n_tracks, translator.n_entries());
    Ok(())
}
