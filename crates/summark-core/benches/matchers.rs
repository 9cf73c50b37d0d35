use criterion::{black_box, criterion_group, criterion_main, Criterion};

use summark_core::lexical::{check_examples, check_pronouns, first_abbreviation_pattern};
use summark_core::tokenize::{DictionaryTokenizer, Tokenizer, UnicodeWordTokenizer};

const ANSWER: &str = "สื่อสังคมหรือสื่อออนไลน์ เป็นช่องทางในการติดต่อ แพร่กระจายข่าวสารข้อมูลต่าง ๆ ให้ผู้คนได้รับรู้ \
แต่ข้อเสียของสื่อออนไลน์คือหากใช้โดยไม่ระมัดระวัง เช่นการแสดงความคิดเห็นทำให้ผู้อื่นเสียหาย \
ในปัจจุบันผู้คนส่วนใหญ่นิยมใช้สื่อออนไลน์เป็นช่องทางในการค้าขาย เพราะเข้าถึงได้ง่ายและรวดเร็ว";

fn words(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn bench_examples(c: &mut Criterion) {
    let phrases = words(&["ยกตัวอย่างเช่น", "อาทิเช่น", "เช่น", "ได้แก่", "ตัวอย่างเช่น"]);
    c.bench_function("check_examples", |b| {
        b.iter(|| check_examples(black_box(ANSWER), black_box(&phrases)))
    });
}

fn bench_pronouns(c: &mut Criterion) {
    let pronouns = words(&["ผม", "ฉัน", "เขา", "เรา", "คุณ", "ท่าน"]);
    let dictionary = DictionaryTokenizer::new([
        "สื่อสังคม", "สื่อออนไลน์", "ช่องทาง", "ผู้คน", "ข่าวสาร", "ข้อมูล", "ผม", "เขา", "เรา",
    ]);

    c.bench_function("check_pronouns_dictionary", |b| {
        b.iter(|| check_pronouns(black_box(ANSWER), black_box(&pronouns), &dictionary))
    });
    c.bench_function("check_pronouns_unicode", |b| {
        b.iter(|| check_pronouns(black_box(ANSWER), black_box(&pronouns), &UnicodeWordTokenizer))
    });
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_unicode", |b| {
        b.iter(|| UnicodeWordTokenizer.tokenize(black_box(ANSWER)))
    });
}

fn bench_abbreviation_pattern(c: &mut Criterion) {
    c.bench_function("first_abbreviation_pattern", |b| {
        b.iter(|| first_abbreviation_pattern(black_box(ANSWER)))
    });
}

criterion_group!(
    benches,
    bench_examples,
    bench_pronouns,
    bench_tokenize,
    bench_abbreviation_pattern
);
criterion_main!(benches);
