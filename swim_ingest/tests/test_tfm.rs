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

/// run with `cargo test test_tfm -- --nocapture`

use uom::si::length::foot;
use uom::si::velocity::knot;

use swim_track::{TrackAmendment, TrackEvent};
use swim_ingest::{parse_suffixed_altitude, Translator, tfm::{TfmConfig, TfmTranslator}};

fn fltd_msg (body: &str)->String {
    format!( r#"<fltdMessage acid="SWA1234" flightRef="20339901" arrApt="KPHX" depApt="KSFO" sourceTimeStamp="2026-08-30T18:00:00.000Z" sourceFacility="ZOB">{}</fltdMessage>"#, body)
}

const TRACK_BODY: &str = r#"<trackInformation>
  <speed>450</speed>
  <reportedAltitude><assignedAltitude><simpleAltitude>350T</simpleAltitude></assignedAltitude></reportedAltitude>
  <position><latitudeDecimal>36.55</latitudeDecimal><longitudeDecimal>-116.25</longitudeDecimal></position>
</trackInformation>"#;

#[test]
fn test_altitude_suffix_convention () {
    assert_eq!( parse_suffixed_altitude( "450T").unwrap().get::<foot>(), 450000.0);
    assert_eq!( parse_suffixed_altitude( "120C").unwrap().get::<foot>(), 12000.0);
    assert_eq!( parse_suffixed_altitude( "85").unwrap().get::<foot>(), 8500.0);
    assert!( parse_suffixed_altitude( "garbage").is_none());
    assert!( parse_suffixed_altitude( "").is_none());
}

#[test]
fn test_track_message () {
    let mut translator = TfmTranslator::new( TfmConfig::default());
    let events = translator.translate( fltd_msg( TRACK_BODY).as_bytes());
    assert_eq!( events.len(), 1);

    let TrackEvent::Update(track) = &events[0] else { panic!("expected update") };
    println!("{track}");
    assert_eq!( track.id, "20339901");
    assert_eq!( track.cs, "SWA1234");
    assert!( (track.position.lat.degrees() - 36.55).abs() < 1e-9);
    assert!( (track.speed.unwrap().get::<knot>() - 450.0).abs() < 1e-6);
    assert!( (track.altitude.unwrap().get::<foot>() - 350000.0).abs() < 1e-6);

    let arr = track.amendments.iter().find_map( |a| match a {
        TrackAmendment::Annotation{key,value} if key == "arrApt" => Some( value.as_str()),
        _ => None
    });
    assert_eq!( arr, Some("KPHX"));
}

#[test]
fn test_actual_eta_completes () {
    let mut translator = TfmTranslator::new( TfmConfig::default());
    translator.translate( fltd_msg( TRACK_BODY).as_bytes());

    let body = r#"<airlineData><eta etaType="ACTUAL" timeValue="2026-08-30T19:41:00.000Z"/></airlineData>"#;
    let events = translator.translate( fltd_msg( body).as_bytes());
    assert_eq!( events.len(), 1);

    let TrackEvent::Completed{id,cs,date,arrival} = &events[0] else { panic!("expected completion") };
    assert_eq!( id, "20339901");
    assert_eq!( cs, "SWA1234");
    assert_eq!( *date, swim_common::datetime::parse_iso_millis( "2026-08-30T19:41:00.000Z").unwrap());
    assert!( arrival.is_some()); // from the cached track position
}

#[test]
fn test_estimated_eta_is_not_terminal () {
    let body = format!( "{}{}", TRACK_BODY,
        r#"<airlineData><eta etaType="ESTIMATED" timeValue="2026-08-30T19:41:00.000Z"/></airlineData>"#);

    let mut translator = TfmTranslator::new( TfmConfig::default());
    let events = translator.translate( fltd_msg( &body).as_bytes());
    assert_eq!( events.len(), 1);
    assert!( matches!( &events[0], TrackEvent::Update(_)));
}

#[test]
fn test_next_event_eta_annotation () {
    let body = format!( "{}{}", TRACK_BODY,
        r#"<ncsmTrackData><nextEvent eta="2026-08-30T18:22:00.000Z"/></ncsmTrackData>"#);

    let mut translator = TfmTranslator::new( TfmConfig::default());
    let events = translator.translate( fltd_msg( &body).as_bytes());
    let TrackEvent::Update(track) = &events[0] else { panic!("expected update") };

    let eta = track.amendments.iter().find_map( |a| match a {
        TrackAmendment::Annotation{key,value} if key == "nextEta" => Some( value.as_str()),
        _ => None
    });
    assert_eq!( eta, Some("2026-08-30T18:22:00.000Z"));
}

#[test]
fn test_missing_acid_skipped () {
    let msg = r#"<fltdMessage flightRef="1" sourceTimeStamp="2026-08-30T18:00:00.000Z"><trackInformation>
      <position><latitudeDecimal>36.0</latitudeDecimal><longitudeDecimal>-116.0</longitudeDecimal></position>
    </trackInformation></fltdMessage>"#;

    let mut translator = TfmTranslator::new( TfmConfig::default());
    assert!( translator.translate( msg.as_bytes()).is_empty());
}
