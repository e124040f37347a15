//! 부동산 용어 사전과 툴팁 주석
//!
//! 결과 화면 하나에서 같은 용어는 처음 한 번만 툴팁을 단다.
//! "이미 단 용어" 집합과 열린 툴팁은 [`TermContext`] 가 들고 있고,
//! 새 결과가 나오면 `reset` 한다.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;

use crate::markdown::{split_bold, Segment, Span};

/// 용어 → 쉬운 설명
pub const TERM_DICT: &[(&str, &str)] = &[
    ("근저당권", "집주인이 이 집을 담보로 은행에서 빌린 빚"),
    ("근저당", "집주인이 이 집을 담보로 은행에서 빌린 빚"),
    ("가압류", "집주인이 빚을 안 갚아서 임시로 집을 팔지 못하게 막아둔 상태"),
    ("선순위채권", "나보다 먼저 보증금을 돌려받을 권리가 있는 빚"),
    ("선순위", "나보다 먼저 보증금을 돌려받을 권리가 있는 순위"),
    ("대항력", "집주인이 바뀌어도 내 보증금을 지킬 수 있는 법적 권리"),
    ("임대인", "집을 빌려주는 사람 (집주인)"),
    ("임차인", "집을 빌리는 사람 (세입자)"),
    ("전세권", "보증금을 돌려받지 못할 때 집을 경매로 넘길 수 있는 강력한 권리"),
];

lazy_static! {
    static ref TERM_RE: Regex = build_term_pattern(TERM_DICT.iter().map(|(t, _)| *t));
}

/// 긴 용어가 먼저 오도록 정렬해 교대 패턴을 만든다
fn build_term_pattern<'a>(terms: impl Iterator<Item = &'a str>) -> Regex {
    let mut sorted: Vec<&str> = terms.collect();
    sorted.sort_by_key(|t| std::cmp::Reverse(t.chars().count()));
    let alternation = sorted
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!("({})", alternation)).unwrap()
}

/// 용어 설명 조회
pub fn definition(term: &str) -> Option<&'static str> {
    TERM_DICT.iter().find(|(t, _)| *t == term).map(|(_, d)| *d)
}

/// 결과 화면 단위 툴팁 상태
#[derive(Debug, Clone, Default)]
pub struct TermContext {
    open_id: Option<String>,
    used_terms: HashSet<String>,
}

impl TermContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// 툴팁 열기/닫기. 다른 툴팁이 열려 있으면 그것은 닫힌다
    pub fn toggle(&mut self, chip_id: &str) {
        if self.is_open(chip_id) {
            self.open_id = None;
        } else {
            self.open_id = Some(chip_id.to_string());
        }
    }

    /// 툴팁 바깥 클릭
    pub fn close(&mut self) {
        self.open_id = None;
    }

    pub fn is_open(&self, chip_id: &str) -> bool {
        self.open_id.as_deref() == Some(chip_id)
    }

    pub fn open_id(&self) -> Option<&str> {
        self.open_id.as_deref()
    }

    pub fn is_used(&self, term: &str) -> bool {
        self.used_terms.contains(term)
    }

    /// 새 결과가 나왔을 때 초기화
    pub fn reset(&mut self) {
        self.open_id = None;
        self.used_terms.clear();
    }
}

/// 텍스트 블록에 용어 툴팁을 단다
///
/// # Arguments
/// * `text` - 결과 텍스트 (줄바꿈, `**굵게**` 포함 가능)
/// * `key_prefix` - 블록 식별자. 툴팁 id 는 `{key_prefix}-chip-{term}`
/// * `ctx` - 같은 결과 화면의 모든 블록이 공유하는 상태
pub fn annotate(text: &str, key_prefix: &str, ctx: &mut TermContext) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut buffer = String::new();

    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            flush(&mut buffer, &mut segments);
            segments.push(Segment::LineBreak);
        }

        for span in split_bold(line) {
            match span {
                Span::Bold(s) => {
                    flush(&mut buffer, &mut segments);
                    segments.push(Segment::Bold(s.to_string()));
                }
                Span::Plain(s) => annotate_plain(s, key_prefix, ctx, &mut buffer, &mut segments),
            }
        }
    }

    flush(&mut buffer, &mut segments);
    segments
}

fn annotate_plain(
    text: &str,
    key_prefix: &str,
    ctx: &mut TermContext,
    buffer: &mut String,
    segments: &mut Vec<Segment>,
) {
    let mut last = 0;
    for m in TERM_RE.find_iter(text) {
        let term = m.as_str();
        if ctx.used_terms.contains(term) {
            continue;
        }
        let Some(def) = definition(term) else {
            continue;
        };

        buffer.push_str(&text[last..m.start()]);
        flush(buffer, segments);
        ctx.used_terms.insert(term.to_string());
        segments.push(Segment::Term {
            chip_id: format!("{}-chip-{}", key_prefix, term),
            term: term.to_string(),
            definition: def,
        });
        last = m.end();
    }
    buffer.push_str(&text[last..]);
}

fn flush(buffer: &mut String, segments: &mut Vec<Segment>) {
    if !buffer.is_empty() {
        segments.push(Segment::Text(std::mem::take(buffer)));
    }
}
