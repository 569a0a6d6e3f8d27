#![allow(unused)]

/// unit tests for the XML pull parser
/// run with "cargo test --test test_xml -- --nocapture"

use swim_common::xml::XmlPullParser;

const POS_REPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<asdexMsg xmlns="urn:us:gov:dot:faa:asdex">
  <airport>KSFO</airport>
  <!-- a position update -->
  <positionReport full="true">
    <time>2021-09-24T17:12:34.331Z</time>
    <track>792</track>
    <latitude>37.61897</latitude>
    <longitude>-122.38414</longitude>
    <altitude>300</altitude>
    <flag/>
  </positionReport>
</asdexMsg>"#;

#[test]
fn test_tag_iteration () {
    let mut parser = XmlPullParser::new( POS_REPORT.as_bytes()).unwrap();
    let mut tags: Vec<(String,bool)> = Vec::new();

    while parser.parse_next_tag() {
        tags.push( (parser.tag_name().to_string(), parser.is_start_tag()));
    }

    println!("parsed tags: {:?}", tags);
    assert_eq!( tags[0], ("asdexMsg".to_string(), true));
    assert_eq!( tags[1], ("airport".to_string(), true));
    assert_eq!( tags[2], ("airport".to_string(), false));
    assert_eq!( tags[3], ("positionReport".to_string(), true));
    assert_eq!( tags.last().unwrap(), &("asdexMsg".to_string(), false));

    // both events for the empty element tag
    assert!( tags.contains( &("flag".to_string(), true)));
    assert!( tags.contains( &("flag".to_string(), false)));
}

#[test]
fn test_content_and_attrs () {
    let mut parser = XmlPullParser::new( POS_REPORT.as_bytes()).unwrap();

    let mut airport = String::new();
    let mut lat = f64::NAN;
    let mut lon = f64::NAN;
    let mut track: Option<i64> = None;
    let mut full_attr = String::new();

    while parser.parse_next_tag() {
        if parser.is_start_tag() {
            match parser.tag_bytes() {
                b"airport" => { airport = parser.read_interned_string_content().unwrap(); }
                b"positionReport" => { full_attr = parser.parse_attr(b"full").unwrap().to_string(); }
                b"latitude" => { lat = parser.read_f64_content().unwrap(); }
                b"longitude" => { lon = parser.read_f64_content().unwrap(); }
                b"track" => { track = parser.read_i64_content(); }
                _ => {}
            }
        }
    }

    println!("airport={}, track={:?}, lat={}, lon={}, full={}", airport, track, lat, lon, full_attr);
    assert_eq!( airport, "KSFO");
    assert_eq!( track, Some(792));
    assert_eq!( full_attr, "true");
    assert!( (lat - 37.61897).abs() < 1e-10);
    assert!( (lon - -122.38414).abs() < 1e-10);
}

#[test]
fn test_ancestor_queries () {
    let mut parser = XmlPullParser::new( POS_REPORT.as_bytes()).unwrap();

    let mut checked = false;
    while parser.parse_next_tag() {
        if parser.is_start_tag() && parser.tag_bytes() == b"latitude" {
            assert!( parser.has_parent( b"positionReport"));
            assert!( !parser.has_parent( b"asdexMsg"));
            assert!( parser.has_ancestor( b"asdexMsg"));
            assert!( !parser.has_ancestor( b"airport"));
            checked = true;
        }
    }
    assert!( checked);
}

#[test]
fn test_skip_element () {
    let mut parser = XmlPullParser::new( POS_REPORT.as_bytes()).unwrap();
    let mut seen_after_skip: Vec<String> = Vec::new();

    while parser.parse_next_tag() {
        if parser.is_start_tag() {
            if parser.tag_bytes() == b"positionReport" {
                assert!( parser.skip_element());
                assert!( !parser.is_start_tag());
                assert_eq!( parser.tag_name(), "positionReport");
            } else {
                seen_after_skip.push( parser.tag_name().to_string());
            }
        }
    }

    println!("start tags outside skipped element: {:?}", seen_after_skip);
    assert_eq!( seen_after_skip, vec!["asdexMsg".to_string(), "airport".to_string()]);
}

#[test]
fn test_malformed_input () {
    // truncated content - parse just stops, no panic
    let truncated = b"<a><b>some text";
    let mut parser = XmlPullParser::new( truncated).unwrap();
    let mut n = 0;
    while parser.parse_next_tag() { n += 1 }
    assert_eq!( n, 2);

    // unbalanced end tag
    let unbalanced = b"<a><b></a></b>";
    let mut parser = XmlPullParser::new( unbalanced).unwrap();
    let mut n = 0;
    while parser.parse_next_tag() { n += 1 }
    assert_eq!( n, 2); // <a>, <b>, then failure on </a>

    // no markup at all is not parseable
    assert!( XmlPullParser::new( b"no markup here").is_none());
    assert!( XmlPullParser::initialize( b"<a/>", 3, 2).is_none());
}
