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

use memchr::memchr;

/// a streamlined pull parser for mostly-wellformed XML surveillance messages.
///
/// The main design points are:
///  - keep track of element nesting so that translators can do parent/ancestor queries
///  - tag names, attribute names/values and content are returned as spans into the input
///    buffer - no allocation happens unless the caller explicitly interns a string
///  - malformed or truncated markup is a normal outcome on live feeds: `parse_next_tag`
///    just returns false, it never panics and never raises an error across message
///    boundaries
///
/// NOTE: XmlPullParser is NOT thread safe, it is designed for speed & memory

const MAX_DEPTH: usize = 64;

#[derive(Clone,Copy,PartialEq,Debug)]
struct Span { start: u32, end: u32 }

impl Span {
    const EMPTY: Span = Span { start: 0, end: 0 };

    #[inline]
    fn new (start: usize, end: usize)->Span { Span { start: start as u32, end: end as u32 } }

    #[inline]
    fn len (&self)->usize { (self.end - self.start) as usize }
}

#[derive(Clone,Copy,PartialEq,Debug)]
enum State {
    Tag,      // positioned before the next '<'
    Attr,     // inside a start tag, before the next attribute
    EndTag,   // pending synthesized end tag event for a '<../>' element
    Content,  // past the '>' of the last tag
    Finished, // end of input or parse failure - all operations answer false
}

pub struct XmlPullParser<'a> {
    data: &'a [u8],
    end: usize,  // exclusive region limit
    idx: usize,  // next unprocessed position

    state: State,

    path: [Span; MAX_DEPTH], // tag name spans of open elements
    depth: usize,

    tag: Span,
    is_start_tag: bool,
    was_empty_tag: bool,

    attr_name: Span,
    attr_value: Span,
}

impl<'a> XmlPullParser<'a> {

    /// set up a parser for the given buffer region. Answers None if the region bounds are
    /// invalid or the region does not contain any markup at all
    pub fn initialize (data: &'a [u8], start: usize, limit: usize)->Option<XmlPullParser<'a>> {
        if start >= limit || limit > data.len() { return None }
        memchr( b'<', &data[start..limit])?; // no markup - not parseable

        Some( XmlPullParser {
            data,
            end: limit,
            idx: start,
            state: State::Tag,
            path: [Span::EMPTY; MAX_DEPTH],
            depth: 0,
            tag: Span::EMPTY,
            is_start_tag: false,
            was_empty_tag: false,
            attr_name: Span::EMPTY,
            attr_value: Span::EMPTY,
        })
    }

    pub fn new (data: &'a [u8])->Option<XmlPullParser<'a>> {
        Self::initialize( data, 0, data.len())
    }

    //--- tag iteration

    /// advance to the next start or end tag. Answers false at end of input or on malformed
    /// markup (unbalanced tags, truncated content), after which the parser stays finished
    pub fn parse_next_tag (&mut self)->bool {
        match self.advance_tag() {
            Some(b) => b,
            None => { self.state = State::Finished; false }
        }
    }

    #[inline]
    pub fn is_start_tag (&self)->bool { self.is_start_tag }

    /// name of the tag we are positioned on, as a span into the input buffer
    #[inline]
    pub fn tag_bytes (&self)->&'a [u8] { self.bytes(self.tag) }

    #[inline]
    pub fn tag_name (&self)->&'a str { self.str_of(self.tag) }

    pub fn depth (&self)->usize { self.depth }

    //--- attribute iteration (only valid while positioned on a start tag)

    pub fn parse_next_attr (&mut self)->bool {
        match self.advance_attr() {
            Some(b) => b,
            None => { self.state = State::Finished; false }
        }
    }

    #[inline]
    pub fn attr_name (&self)->&'a [u8] { self.bytes(self.attr_name) }

    #[inline]
    pub fn attr_value (&self)->&'a str { self.str_of(self.attr_value) }

    /// iterate attributes of the current start tag until one with the given name is found
    pub fn parse_attr (&mut self, name: &[u8])->Option<&'a str> {
        while self.parse_next_attr() {
            if self.bytes(self.attr_name) == name {
                return Some( self.str_of(self.attr_value))
            }
        }
        None
    }

    //--- ancestor queries (O(depth) walk of the tag stack)

    pub fn has_parent (&self, name: &[u8])->bool {
        match self.parent_idx() {
            Some(i) => self.bytes(self.path[i]) == name,
            None => false
        }
    }

    pub fn has_ancestor (&self, name: &[u8])->bool {
        if let Some(mut i) = self.parent_idx() {
            loop {
                if self.bytes(self.path[i]) == name { return true }
                if i == 0 { return false }
                i -= 1;
            }
        }
        false
    }

    //--- content retrieval (only valid while positioned on a start tag)

    /// trimmed element content as a span into the input buffer, None for empty or
    /// markup-only content. Note this answers the text up to the next tag, which is all
    /// the single-value surveillance schemas use
    pub fn parse_content_string (&mut self)->Option<&'a str> {
        self.skip_to_content()?;

        let i0 = self.idx;
        let i1 = self.skip_to_from( i0, b'<')?;
        self.idx = i1; // leave position on '<' for the next parse_next_tag

        let s = self.str_of( Span::new(i0,i1)).trim();
        if s.is_empty() { None } else { Some(s) }
    }

    /// element content interned into an owned String - the one explicit allocation point
    pub fn read_interned_string_content (&mut self)->Option<String> {
        self.parse_content_string().map( |s| s.to_string())
    }

    pub fn read_f64_content (&mut self)->Option<f64> {
        self.parse_content_string()?.parse().ok()
    }

    pub fn read_i64_content (&mut self)->Option<i64> {
        self.parse_content_string()?.parse().ok()
    }

    //--- skip helpers to fast-forward over uninteresting subtrees

    /// skip the remainder of the current start element, leaving the parser positioned on
    /// its end tag event. Answers false if the element never closes
    pub fn skip_element (&mut self)->bool {
        if !self.is_start_tag { return false }
        let target = self.depth - 1;

        while self.parse_next_tag() {
            if !self.is_start_tag && self.depth == target { return true }
        }
        false
    }

    /* #region internals ******************************************************************/

    fn advance_tag (&mut self)->Option<bool> {
        loop {
            match self.state {
                State::Finished => return Some(false),

                State::EndTag => { // synthesized end for a '<../>' element - tag span still valid
                    self.is_start_tag = false;
                    if self.depth == 0 { return None }
                    self.depth -= 1;
                    self.state = if self.depth == 0 { State::Finished } else { State::Content };
                    return Some(true)
                }

                State::Attr => { // un-parsed attributes left, skip past them
                    self.skip_past_tag()?;
                    self.state = if self.was_empty_tag { State::EndTag } else { State::Content };
                }

                State::Content => {
                    if self.depth == 0 { return Some(false) }
                    self.idx = self.skip_to_from( self.idx, b'<')?;
                    self.state = State::Tag;
                }

                State::Tag => return self.parse_tag(),
            }
        }
    }

    fn parse_tag (&mut self)->Option<bool> {
        loop {
            let i = self.skip_to_from( self.idx, b'<')?;
            let i1 = i + 1;

            match *self.data.get(i1)? {
                b'?' => { // prolog/directive, skip over
                    self.idx = self.skip_past_directive(i1+1)?;
                }
                b'!' => { // comment or CDATA, skip over
                    self.idx = self.skip_past_comment_or_cdata(i1+1)?;
                }
                b'/' => return self.parse_end_tag(i1+1),
                _ => return self.parse_start_tag(i1),
            }
        }
    }

    fn parse_end_tag (&mut self, i0: usize)->Option<bool> {
        let i1 = self.skip_to_from( i0, b'>')?;
        let tag = Span::new(i0,i1);

        if self.depth == 0 || self.bytes(self.path[self.depth-1]) != self.bytes(tag) {
            return None // unbalanced end tag
        }

        self.tag = tag;
        self.is_start_tag = false;
        self.depth -= 1;
        self.idx = i1 + 1;
        self.clear_attrs();
        self.state = if self.depth == 0 { State::Finished } else { State::Content };
        Some(true)
    }

    fn parse_start_tag (&mut self, i0: usize)->Option<bool> {
        let mut i = i0;
        loop {
            let b = *self.data.get(i)?;
            if i >= self.end { return None }

            if b <= b' ' { // attributes follow
                self.set_start_tag( i0, i)?;
                self.idx = i;
                self.state = State::Attr;
                return Some(true)

            } else if b == b'/' {
                if *self.data.get(i+1)? != b'>' { return None } // malformed empty element tag
                self.set_start_tag( i0, i)?;
                self.was_empty_tag = true;
                self.idx = i + 2;
                self.state = State::EndTag;
                return Some(true)

            } else if b == b'>' {
                self.set_start_tag( i0, i)?;
                self.was_empty_tag = false;
                self.idx = i + 1;
                self.state = State::Content;
                return Some(true)
            }
            i += 1;
        }
    }

    fn set_start_tag (&mut self, i0: usize, i1: usize)->Option<()> {
        if self.depth >= MAX_DEPTH { return None }
        let tag = Span::new(i0,i1);
        self.path[self.depth] = tag;
        self.depth += 1;
        self.tag = tag;
        self.is_start_tag = true;
        self.clear_attrs();
        Some(())
    }

    fn advance_attr (&mut self)->Option<bool> {
        if self.state != State::Attr { return Some(false) }

        let i = self.skip_space(self.idx)?;
        match *self.data.get(i)? {
            b'/' => {
                if *self.data.get(i+1)? != b'>' { return None } // malformed tag end
                self.idx = i + 2;
                self.was_empty_tag = true;
                self.state = State::EndTag;
                Some(false)
            }
            b'>' => {
                self.idx = i + 1;
                self.was_empty_tag = false;
                self.state = State::Content;
                Some(false)
            }
            _ => {
                let i0 = i;
                let ieq = self.skip_to_from( i, b'=')?;
                let mut i1 = ieq;
                while i1 > i0 && self.data[i1-1] <= b' ' { i1 -= 1 } // backtrack name-trailing space
                self.attr_name = Span::new(i0,i1);

                let iq = self.skip_to_from( ieq+1, b'"')?;
                let iv0 = iq + 1;
                let iv1 = self.skip_to_from( iv0, b'"')?;
                self.attr_value = Span::new(iv0,iv1);

                self.idx = iv1 + 1;
                Some(true)
            }
        }
    }

    /// position on the first content byte of the current start tag, consuming remaining
    /// attributes. Answers None for end tags and empty element tags
    fn skip_to_content (&mut self)->Option<()> {
        if !self.is_start_tag { return None }

        match self.state {
            State::Attr => {
                self.skip_past_tag()?;
                if self.was_empty_tag {
                    self.state = State::EndTag;
                    None
                } else {
                    self.state = State::Content;
                    Some(())
                }
            }
            State::Content => Some(()),
            _ => None
        }
    }

    /// scan past remaining attributes to the tag-closing '>', skipping quoted values
    fn skip_past_tag (&mut self)->Option<()> {
        let mut i = self.idx;
        loop {
            match *self.data.get(i)? {
                b'>' => {
                    self.was_empty_tag = false;
                    self.idx = i + 1;
                    return Some(())
                }
                b'/' => {
                    if *self.data.get(i+1)? == b'>' {
                        self.was_empty_tag = true;
                        self.idx = i + 2;
                        return Some(())
                    }
                    return None
                }
                b'"' => {
                    i = self.skip_to_from( i+1, b'"')? + 1;
                }
                _ => i += 1
            }
        }
    }

    fn skip_past_directive (&mut self, i0: usize)->Option<usize> {
        let mut i = i0;
        loop {
            match *self.data.get(i)? {
                b'?' => {
                    if *self.data.get(i+1)? == b'>' { return Some(i+2) }
                    i += 1;
                }
                b'"' => { i = self.skip_to_from( i+1, b'"')? + 1; }
                _ => i += 1
            }
        }
    }

    fn skip_past_comment_or_cdata (&mut self, i0: usize)->Option<usize> {
        let data = self.data;

        if data.get(i0..i0+2)? == b"--" { // '<!--' comment
            let mut i = i0 + 2;
            loop {
                i = self.skip_to_from( i, b'-')?;
                if data.get(i+1..i+3)? == b"->" { return Some(i+3) }
                i += 1;
            }
        } else if data.get(i0..i0+7)? == b"[CDATA[" { // CDATA section - ignored
            let mut i = i0 + 7;
            loop {
                i = self.skip_to_from( i, b']')?;
                if data.get(i+1..i+3)? == b"]>" { return Some(i+3) }
                i += 1;
            }
        } else {
            None // comment or CDATA expected
        }
    }

    #[inline]
    fn skip_to_from (&self, i0: usize, b: u8)->Option<usize> {
        if i0 >= self.end { return None }
        memchr( b, &self.data[i0..self.end]).map( |i| i0 + i)
    }

    fn skip_space (&self, i0: usize)->Option<usize> {
        let mut i = i0;
        while *self.data.get(i)? <= b' ' { i += 1 }
        if i < self.end { Some(i) } else { None }
    }

    fn parent_idx (&self)->Option<usize> {
        let top = if self.is_start_tag { self.depth.checked_sub(2)? } else { self.depth.checked_sub(1)? };
        Some(top)
    }

    #[inline]
    fn clear_attrs (&mut self) {
        self.attr_name = Span::EMPTY;
        self.attr_value = Span::EMPTY;
    }

    #[inline]
    fn bytes (&self, span: Span)->&'a [u8] {
        &self.data[span.start as usize..span.end as usize]
    }

    #[inline]
    fn str_of (&self, span: Span)->&'a str {
        // feeds are ASCII-dominated utf-8, anything else is tolerated as empty
        std::str::from_utf8( self.bytes(span)).unwrap_or("")
    }

    /* #endregion internals */
}
