// tests/analyze_week.rs
//
// End-to-end scenarios for the weekly report over the built-in Korean lexicon.
//
// Covered:
// - toilet/excrement scenario (summary + outlook branch)
// - empty week (zero vectors, first-label feeling, default branches)
// - label/distribution alignment, idempotence
// - keyword filter + dream-text fallback

use dream_week_analyzer::{config::Lexicon, AnalysisResult, WeekAnalyzer};

const NONE: [&str; 0] = [];

fn analyzer() -> WeekAnalyzer {
    WeekAnalyzer::builtin().expect("built-in analyzer")
}

fn lexicon() -> Lexicon {
    Lexicon::builtin().expect("built-in lexicon")
}

fn assert_aligned(r: &AnalysisResult) {
    assert_eq!(r.emotion_labels.len(), r.emotion_dist.len());
    assert_eq!(r.theme_labels.len(), r.theme_dist.len());
}

#[test]
fn toilet_dream_fires_cleansing_branches() {
    let lex = lexicon();
    let r = analyzer().analyze_week(&["나는 화장실에서 볼일을 봤다"], &["편안한 기분을 느꼈다"]);

    assert_aligned(&r);
    assert!(
        r.narrative.contains(&lex.narrative.summary.toilet_excrement),
        "summary fragment missing: {}",
        r.narrative
    );
    assert!(!r.narrative.contains(&lex.narrative.summary.fallback));
    assert!(r.narrative.contains(&lex.narrative.outlook.toilet_excrement));
    assert!(!r.narrative.contains(&lex.narrative.outlook.fallback));

    // "편안" is an exact calm keyword and nothing else scores
    assert_eq!(r.feeling, "평온");
    assert!((r.emotion_dist[0] - 100.0).abs() < 1e-9);

    // interpretation words never occur in the dream → dream-text keywords
    assert!(r.keywords.iter().any(|k| k == "화장실"));
    assert!(r.keywords.len() <= 3);
}

#[test]
fn empty_week_degrades_to_defaults() {
    let lex = lexicon();
    let r = analyzer().analyze_week(&NONE, &NONE);

    assert_aligned(&r);
    assert_eq!(r.emotion_dist, vec![0.0; 8]);
    assert_eq!(r.theme_dist, vec![0.0; 4]);
    assert!(r.keywords.is_empty());
    assert_eq!(r.feeling, r.emotion_labels[0]);

    assert!(r.narrative.contains(&lex.narrative.summary.fallback));
    assert!(r.narrative.contains(&lex.narrative.symbol.fallback));
    assert!(r.narrative.contains(&lex.narrative.outlook.fallback));
    let without = lex.narrative.emotion.without_themes.replace("{feeling}", &r.feeling);
    assert!(r.narrative.contains(&without));
}

#[test]
fn distribution_sums_to_hundred() {
    let r = analyzer().analyze_week(
        &["친구와 바다를 보며 행복했다", "시험에 떨어지는 꿈을 꿔서 불안했다"],
        &["새로운 도전을 앞둔 긴장과 기대가 섞여 있습니다"],
    );
    assert_aligned(&r);
    let sum: f64 = r.emotion_dist.iter().sum();
    assert!((sum - 100.0).abs() < 1e-6, "sum = {sum}");
    assert!(r.emotion_dist.iter().all(|v| *v >= 0.0));
    let tsum: f64 = r.theme_dist.iter().sum();
    assert!((tsum - 100.0).abs() < 1e-6, "theme sum = {tsum}");
}

#[test]
fn same_input_same_result() {
    let a = analyzer();
    let dreams = ["돼지가 마당에서 뛰어놀았다", "손으로 황금 동전을 주웠다"];
    let interps = ["재물운이 들어오는 꿈입니다", "노력의 결실을 뜻합니다"];
    let first = a.analyze_week(&dreams, &interps);
    let second = a.analyze_week(&dreams, &interps);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn pig_and_house_select_their_symbol_branch() {
    let lex = lexicon();
    let r = analyzer().analyze_week(&["돼지가 우리 집으로 들어왔다"], &NONE);
    assert!(r.narrative.contains(&lex.narrative.symbol.pig_house));
    assert!(r.narrative.contains(&lex.narrative.outlook.pig));
}

#[test]
fn interpretation_keywords_must_appear_in_dream() {
    let r = analyzer().analyze_week(
        &["낡은 지갑을 잃어버렸다"],
        &["지갑 지갑 분실은 재정 관리에 대한 불안을 의미합니다"],
    );
    assert_eq!(r.keywords.first().map(String::as_str), Some("지갑"));
    assert!(r.keywords.iter().all(|k| !k.contains("재정")));
}
