//! 최소 마크다운 렌더링
//!
//! 지원: `**굵게**`, 줄바꿈

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref BOLD_RE: Regex = Regex::new(r"\*\*([^*]+)\*\*").unwrap();
}

/// 렌더링 단위
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Segment {
    Text(String),
    Bold(String),
    /// 용어 툴팁이 붙는 첫 등장 용어
    #[serde(rename_all = "camelCase")]
    Term {
        chip_id: String,
        term: String,
        definition: &'static str,
    },
    LineBreak,
}

/// 한 줄 안의 구간
pub(crate) enum Span<'a> {
    Plain(&'a str),
    Bold(&'a str),
}

/// 한 줄을 일반 구간과 굵은 구간으로 나눈다
pub(crate) fn split_bold(line: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut last = 0;
    for caps in BOLD_RE.captures_iter(line) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            spans.push(Span::Plain(&line[last..whole.start()]));
        }
        spans.push(Span::Bold(inner.as_str()));
        last = whole.end();
    }
    if last < line.len() {
        spans.push(Span::Plain(&line[last..]));
    }
    spans
}

/// 텍스트를 렌더링 단위로 변환
pub fn render_markdown(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            segments.push(Segment::LineBreak);
        }
        for span in split_bold(line) {
            segments.push(match span {
                Span::Plain(s) => Segment::Text(s.to_string()),
                Span::Bold(s) => Segment::Bold(s.to_string()),
            });
        }
    }
    segments
}
