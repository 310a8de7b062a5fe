//! Test fixtures: seed corpora and manifests.

/// A small but fully-featured corpus: enough distinct meanings for a
/// four-choice question set, plus example sentences usable as cloze
/// prompts.
pub const WORDS_CSV: &str = "\
id,word,meaning,pos,example,translation
1,run,走る,v,I run every morning.,毎朝走る。
2,walk,歩く,v,We walk to school.,学校まで歩く。
3,bright,明るい,adj,The room is bright.,部屋は明るい。
4,quiet,静かな,adj,A quiet library.,静かな図書館。
5,river,川,n,The river is wide.,その川は広い。
6,mountain,山,n,A tall mountain.,高い山。
7,swift,速い,adj,A swift reply.,速い返事。
8,gather,集める,v,They gather data.,データを集める。
";

/// Dataset manifest listing the legacy corpus first.
pub const MANIFEST_CSV: &str = "\
words.csv,Core vocabulary
phrases.csv,Common phrases
";

/// A v1 persisted collection: bare array, unbounded level, stale
/// `interval` field.
pub const LEGACY_V1_ITEMS: &str = r#"[
    {"id": 1, "en": "run", "ja": "走る", "pos": "v", "ex": "I run.", "exJa": "走る。",
     "stats": {"level": 7, "nextReview": 1700000000000, "interval": 30}},
    {"id": 2, "en": "walk", "ja": "歩く",
     "stats": {"level": 2, "nextReview": 0, "interval": 3}},
    {"id": 3, "en": "bright", "ja": "明るい"},
    {"id": 4, "en": "quiet", "ja": "静かな"},
    {"id": 5, "en": "river", "ja": "川"}
]"#;
