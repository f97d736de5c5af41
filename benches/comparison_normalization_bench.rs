#![deny(unsafe_code)]
#![warn(clippy::all)]
#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use icu_normalizer::{ComposingNormalizerBorrowed, DecomposingNormalizerBorrowed};
use normy::{
    NFC, NFD, NFKC, NFKD, Normy, NormyBuilder,
    process::{ChainedProcess, EmptyProcess},
    stage::normalization::{NfcStage, NfdStage, NfkcStage, NfkdStage},
};
use rand::{Rng, SeedableRng, random, rngs::StdRng};
use std::borrow::Cow;
use std::{hint::black_box, sync::LazyLock};
use tokenizers::{
    NormalizedString, Normalizer,
    normalizers::{
        Sequence, unicode::NFC as tokenizerNFC, unicode::NFD as tokenizerNFD,
        unicode::NFKC as tokenizerNFKC, unicode::NFKD as tokenizerNFKD,
    },
};
use unicode_normalization::UnicodeNormalization;

// â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€
// Stress Samples
// â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€â”€
static STRESS_POOL_NFC_NFD: &[&str] = &[
    "Tiáº¿ng Viá»‡t Quá»‘c ngá»¯ Phá»Ÿ HÃ  Ná»™i",
    "SÅ“ur naÃ¯ve Ã  l'Å“uf Å’UF dÃ©jÃ -vu",
    "FuÃŸball StraÃŸe MaÃŸstab GRÃœNE STRAáºžE",
    "Ä°STANBUL Ä°ÄžNE Ä°ÄžDE Ä±iIÄ°",
    "Â¡EspaÃ±a maÃ±ana JosÃ© PeÃ±a!",
    "ÅÃ³dÅº Å¼Ã³Å‚Ä‡ Å»Ã“ÅÄ† Å»ubrÃ³wka",
    "Å½emaitija Å iauliai Jurgis",
    "Ãžetta er Ã­slenska ÃÃ°ÃžÃ¾",
    "È˜tefan ÈšarÄƒ RomÃ¢nia",
    "Äuro ÄakoviÄ‡ Ljiljana Njiva",
    "á¼ˆÏÏ‡Î¹Î¼Î®Î´Î·Ï‚ á¼™Î»Î»Î¬Ï‚ ÏƒÎ¿Ï†ÏŒÏ‚",
    "ÐÐ»ÐºÐ¸-Ð¿Ð°Ð»ÐºÐ¸ Ð²ÑÑ‘ ÐÌÐ½Ð½Ð°",
    "Ø§Ù„Ù’ÙƒÙØªÙŽØ§Ø¨Ù Ù…ÙØ­ÙŽÙ…ÙŽÙ‘Ø¯ÙŒ Ù€Ù€Ù€",
    "×¡Öµ×¤Ö¶×¨ ×¢Ö´×‘Ö°×¨Ö´×™×ª ×©×‚",
    "à¤¹à¤¿à¤¨à¥à¤¦à¥€ à¤œà¤¼à¤¿à¤‚à¤¦à¤—à¥€ à¤•à¤¼à¤¿à¤²à¤¾",
    "à¸ à¸²à¸©à¸²à¹„à¸—à¸¢ à¸ªà¸§à¸±à¸ªà¸”à¸µà¸„à¸£à¸±à¸š à¹‘à¹’à¹“",
    "í•œê¸€ ï¼«ï¼¯ï¼²ï¼¥ï¼¡ í•œêµ­ì–´",
    "ï¾Šï¾Ÿï¾‹ï¾Ÿï¾Œï¾Ÿï¾ï¾Ÿï¾Žï¾Ÿ ãƒ¼ãƒ¼ ã“ã‚“ã«ã¡ã¯",
    "ï¼¨ï¼´ï¼­ï¼¬ã€€ï¼œï½”ï½ï½‡ï¼žã€€ä½ å¥½ä¸–ç•Œ",
    "ðŸ‘¨â€ðŸ‘©â€ðŸ‘§â€ðŸ‘¦ ðŸ‘ðŸ¼ âœ¨ ðŸš€",
    "ï¬ï¬‚ï¬ƒï¬„ï¬†ï¬€ï¬ï¬ƒï¬ƒï¬ƒ",
];

static STRESS_POOL_NFKC_NFKD: &[&str] = &[
    "ï¬€ ï¬ ï¬‚ ï¬ƒ ï¬„ ï¬† ï¬ï¬€ï¬ƒï¬ƒ",
    "Â½ â…“ Â¼ â…• â…™ â…› â…” Â¾",
    "â‘ â‘¡â‘¢â‘£â‘¤ â‘© â‘´â‘µâ‘¶ â’ˆâ’‰â’Š",
    "ï¼¨ï½…ï½Œï½Œï½ã€€ï¼·ï½ï½’ï½Œï½„ã€€ï¼†ã€€ï¼œï¼ž",
    "ãˆ± ãˆ² ãŽ ãŽž ãŽ¡",
    "â„– â„¡ â„¢ Â© Â®",
];

fn realistic_corpus(seed: u64, size_kb: usize) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = String::with_capacity(size_kb * 1024);
    let pools = [STRESS_POOL_NFC_NFD, STRESS_POOL_NFKC_NFKD];

    while out.len() < size_kb * 1024 {
        let pool = pools[rng.random_range(0..pools.len())];
        let text = pool[rng.random_range(0..pool.len())];
        for _ in 0..rng.random_range(1..=5) {
            out.push_str(text);
            out.push(' ');
        }
        if rng.random_bool(0.1) {
            let word: String = (0..rng.random_range(5..20))
                .map(|_| (b'a' + (random::<u8>() % 26)) as char)
                .collect();
            out.push_str(&word);
            out.push(' ');
        }
    }

    // Truncate at a valid UTF-8 boundary
    let max_len = size_kb * 1024;
    if out.len() > max_len {
        let mut truncate_at = max_len;
        while truncate_at > 0 && !out.is_char_boundary(truncate_at) {
            truncate_at -= 1;
        }
        out.truncate(truncate_at);
    }
    out
}

// Corpus generators
fn corpus_needs_nfc(seed: u64, size_kb: usize) -> String {
    let mut base = realistic_corpus(seed, size_kb);
    base.push_str(STRESS_POOL_NFC_NFD[0]);
    base.push_str(STRESS_POOL_NFC_NFD[1]);
    base.nfd().collect()
}

fn corpus_needs_nfd(seed: u64, size_kb: usize) -> String {
    realistic_corpus(seed, size_kb).nfc().collect()
}

fn corpus_needs_nfkc(seed: u64, size_kb: usize) -> String {
    let base = realistic_corpus(seed, size_kb);
    let mut s: String = base.nfkd().collect();
    s = s.nfc().collect();
    s.push_str(" ï¬ï¬‚ï¬ƒï¬„ï¬†ï¬€ï¬ï¬ƒï¬ƒï¬ƒ â‘ â‘¡â‘¢ Â½â…“Â¼ ï¼¨ï½…ï½Œï½Œï½ ï¼œï¼ž ï¼†");
    s
}

fn corpus_needs_nfkd(seed: u64, size_kb: usize) -> String {
    let s: String = realistic_corpus(seed, size_kb).nfkc().collect();
    format!("{} ï¬ ï¬‚ ï¬ƒ ï¬€ ï¬† ï¬ï¬€ï¬ƒï¬ƒ â‘  Â½ ï¼† ï¼¨ï½…ï½Œï½Œï½ ï¼œï¼ž", s)
}

fn corpus_already_nfc(seed: u64, size_kb: usize) -> String {
    realistic_corpus(seed, size_kb).nfc().collect()
}

fn corpus_already_nfd(seed: u64, size_kb: usize) -> String {
    realistic_corpus(seed, size_kb).nfd().collect()
}

fn corpus_already_nfkc(seed: u64, size_kb: usize) -> String {
    realistic_corpus(seed, size_kb).nfkc().collect()
}

fn corpus_already_nfkd(seed: u64, size_kb: usize) -> String {
    realistic_corpus(seed, size_kb).nfkd().collect()
}

// â”€â”€ ICU4X â”€â”€
static ICU4X_NFC: LazyLock<ComposingNormalizerBorrowed<'static>> =
    LazyLock::new(ComposingNormalizerBorrowed::new_nfc);
static ICU4X_NFKC: LazyLock<ComposingNormalizerBorrowed<'static>> =
    LazyLock::new(ComposingNormalizerBorrowed::new_nfkc);
static ICU4X_NFD: LazyLock<DecomposingNormalizerBorrowed<'static>> =
    LazyLock::new(DecomposingNormalizerBorrowed::new_nfd);
static ICU4X_NFKD: LazyLock<DecomposingNormalizerBorrowed<'static>> =
    LazyLock::new(DecomposingNormalizerBorrowed::new_nfkd);

// â”€â”€ HF Tokenizers â”€â”€
static HF_NFC: LazyLock<Sequence> =
    LazyLock::new(|| Sequence::new(vec![tokenizers::NormalizerWrapper::NFC(tokenizerNFC)]));
static HF_NFKC: LazyLock<Sequence> =
    LazyLock::new(|| Sequence::new(vec![tokenizers::NormalizerWrapper::NFKC(tokenizerNFKC)]));
static HF_NFD: LazyLock<Sequence> =
    LazyLock::new(|| Sequence::new(vec![tokenizers::NormalizerWrapper::NFD(tokenizerNFD)]));
static HF_NFKD: LazyLock<Sequence> =
    LazyLock::new(|| Sequence::new(vec![tokenizers::NormalizerWrapper::NFKD(tokenizerNFKD)]));

fn hf_normalize(text: &str, normalizer: &Sequence) -> String {
    let mut n = NormalizedString::from(text);
    normalizer.normalize(&mut n).unwrap();
    n.get().to_string()
}

// â”€â”€ Normy â”€â”€
static NORMY_NFC: LazyLock<Normy<ChainedProcess<NfcStage, EmptyProcess>>> =
    LazyLock::new(|| NormyBuilder::default().add_stage(NFC).build());
static NORMY_NFKC: LazyLock<Normy<ChainedProcess<NfkcStage, EmptyProcess>>> =
    LazyLock::new(|| NormyBuilder::default().add_stage(NFKC).build());
static NORMY_NFD: LazyLock<Normy<ChainedProcess<NfdStage, EmptyProcess>>> =
    LazyLock::new(|| NormyBuilder::default().add_stage(NFD).build());
static NORMY_NFKD: LazyLock<Normy<ChainedProcess<NfkdStage, EmptyProcess>>> =
    LazyLock::new(|| NormyBuilder::default().add_stage(NFKD).build());

fn benches_normalization_forms(c: &mut Criterion) {
    let mut group = c.benchmark_group("Normalization Forms");
    group.measurement_time(std::time::Duration::from_secs(10));

    let scenarios = [
        ("NFC", "Needs NFC", corpus_needs_nfc(0x517ea41e, 128)),
        ("NFC", "Already NFC", corpus_already_nfc(0x1a71c0fe, 128)),
        ("NFD", "Needs NFD", corpus_needs_nfd(0xdeadbeef, 128)),
        ("NFD", "Already NFD", corpus_already_nfd(0xb1a9c3d4, 128)),
        ("NFKC", "Needs NFKC", corpus_needs_nfkc(0x1337c0de, 128)),
        ("NFKC", "Already NFKC", corpus_already_nfkc(0x76543210, 128)),
        ("NFKD", "Needs NFKD", corpus_needs_nfkd(0xcafef00d, 128)),
        ("NFKD", "Already NFKD", corpus_already_nfkd(0xabcdef01, 128)),
    ];

    for (form, scenario, corpus) in &scenarios {
        group.throughput(Throughput::Bytes(corpus.len() as u64));

        // Benchmark each library
        match *form {
            "NFC" => {
                bench_with_cow("Normy", form, scenario, &mut group, corpus, |s| {
                    NORMY_NFC.normalize(s).unwrap()
                });
                bench_with_cow("ICU4X", form, scenario, &mut group, corpus, |s| {
                    ICU4X_NFC.normalize(s)
                });
                bench_no_cow("Unicode", form, scenario, &mut group, corpus, |s: &str| {
                    s.nfc().collect::<String>()
                });
                bench_no_cow("HF Tokenizers", form, scenario, &mut group, corpus, |s| {
                    hf_normalize(s, &HF_NFC)
                });
            }
            "NFD" => {
                bench_with_cow("Normy", form, scenario, &mut group, corpus, |s| {
                    NORMY_NFD.normalize(s).unwrap()
                });
                bench_with_cow("ICU4X", form, scenario, &mut group, corpus, |s| {
                    ICU4X_NFD.normalize(s)
                });
                bench_no_cow("Unicode", form, scenario, &mut group, corpus, |s: &str| {
                    s.nfd().collect::<String>()
                });
                bench_no_cow("HF Tokenizers", form, scenario, &mut group, corpus, |s| {
                    hf_normalize(s, &HF_NFD)
                });
            }
            "NFKC" => {
                bench_with_cow("Normy", form, scenario, &mut group, corpus, |s| {
                    NORMY_NFKC.normalize(s).unwrap()
                });
                bench_with_cow("ICU4X", form, scenario, &mut group, corpus, |s| {
                    ICU4X_NFKC.normalize(s)
                });
                bench_no_cow("Unicode", form, scenario, &mut group, corpus, |s: &str| {
                    s.nfkc().collect::<String>()
                });
                bench_no_cow("HF Tokenizers", form, scenario, &mut group, corpus, |s| {
                    hf_normalize(s, &HF_NFKC)
                });
            }
            "NFKD" => {
                bench_with_cow("Normy", form, scenario, &mut group, corpus, |s| {
                    NORMY_NFKD.normalize(s).unwrap()
                });
                bench_with_cow("ICU4X", form, scenario, &mut group, corpus, |s| {
                    ICU4X_NFKD.normalize(s)
                });
                bench_no_cow("Unicode", form, scenario, &mut group, corpus, |s: &str| {
                    s.nfkd().collect::<String>()
                });
                bench_no_cow("HF Tokenizers", form, scenario, &mut group, corpus, |s| {
                    hf_normalize(s, &HF_NFKD)
                });
            }
            _ => unreachable!(),
        }
    }

    group.finish();
}

fn bench_with_cow<F>(
    lib: &str,
    form: &str,
    scenario: &str,
    group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>,
    corpus: &str,
    mut func: F,
) where
    F: FnMut(&str) -> Cow<'_, str>,
{
    let mut zero_copy_count = 0;
    let mut total_count = 0;

    group.bench_function(BenchmarkId::new(format!("{} {}", lib, form), scenario), |b| {
        b.iter(|| {
            let result = func(black_box(corpus));
            total_count += 1;
            // Check for zero-copy: pointer is the same AND length is the same (handle NF*D being same length)
            if matches!(result, Cow::Borrowed(s) if s.as_ptr() == corpus.as_ptr() && s.len() == corpus.len()) {
                zero_copy_count += 1;
            }
            result
        })
    });

    // Print the zero-copy info directly to console output (not recorded in Criterion's data)
    let zero_copy_pct = if total_count > 0 {
        (zero_copy_count as f64 / total_count as f64) * 100.0
    } else {
        0.0
    };
    println!(
        "  {} {} - {}: Zero-Copy {:.1}% ({}/{})",
        lib, form, scenario, zero_copy_pct, zero_copy_count, total_count
    );
}

fn bench_no_cow<F>(
    lib: &str,
    form: &str,
    scenario: &str,
    group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>,
    corpus: &str,
    func: F,
) where
    F: Fn(&str) -> String,
{
    group.bench_function(
        BenchmarkId::new(format!("{} {}", lib, form), scenario),
        |b| b.iter(|| func(black_box(corpus))),
    );

    println!(
        "  {} {} - {}: Always allocates (0.0% Zero-Copy)",
        lib, form, scenario
    );
}

criterion_group!(benches, benches_normalization_forms);
criterion_main!(benches);
