//! The `summark init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    write_if_missing(Path::new("summark.toml"), SAMPLE_CONFIG)?;
    write_if_missing(Path::new("rubric.toml"), SAMPLE_RUBRIC)?;

    println!("\nNext steps:");
    println!("  1. Put your TNER API key in summark.toml (or export SUMMARK_TNER_KEY)");
    println!("  2. Run: summark validate --rubric rubric.toml");
    println!("  3. Run: summark evaluate --rubric rubric.toml --answer answer.txt");

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        println!("{} already exists, skipping.", path.display());
    } else {
        std::fs::write(path, content)?;
        println!("Created {}", path.display());
    }
    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# summark configuration

[embedder]
type = "ollama"
base_url = "http://localhost:11434"
model = "bge-m3"

# [embedder]
# type = "openai"
# api_key = "${OPENAI_API_KEY}"
# model = "text-embedding-3-small"

[tagger]
api_key = "${SUMMARK_TNER_KEY}"
timeout_secs = 10

[tokenizer]
kind = "unicode"
# kind = "dictionary"
# dictionary_file = "words.txt"
"#;

const SAMPLE_RUBRIC: &str = r#"[rubric]
forbidden_title = "การใช้สื่อสังคมออนไลน์"
similarity_threshold = 0.8
reference_text = """
สื่อสังคม (Social Media) หรือที่คนทั่วไปเรียกว่า สื่อออนไลน์ หรือ สื่อสังคม ออนไลน์ นั้น \
เป็นสื่อหรือช่องทางที่แพร่กระจายข้อมูลข่าวสารในรูปแบบต่างๆ ได้อย่างรวดเร็วไปยังผู้คนที่อยู่ทั่วทุกมุมโลก
"""

[examples]
phrases = ["ยกตัวอย่างเช่น", "ตัวอย่างเช่น", "อาทิเช่น", "อาทิ", "เช่น", "ได้แก่"]
# file = "local_words.txt"

[pronouns]
primary = ["ผม", "กระผม", "ฉัน", "ดิฉัน", "ข้าพเจ้า", "เรา", "พวกเรา"]
secondary = ["คุณ", "เธอ", "ท่าน", "เขา", "พวกเขา", "มัน"]
# primary_file = "pronouns_1.txt"
# secondary_file = "pronouns_2.txt"
"#;
