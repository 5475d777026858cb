//! ペルソナと質問からモデルに送る 1 本のプロンプトを組み立てる

use crate::domain::{Choice, PersonaConfig};

/// ダイアグラム要求ルール（Visual Flowcharts のときだけ入る）
pub const DIAGRAM_RULE: &str = "Generate valid Graphviz DOT code (start with ```dot).";

/// プロンプトを組み立てる。ルール番号は常に 1 から連番。
pub fn build_prompt(persona: &PersonaConfig, message: &str) -> String {
    let interest = persona.interest.label();
    let mut rules = vec![format!("Use {} analogies.", interest)];
    if persona.style.wants_diagram() {
        rules.push(DIAGRAM_RULE.to_string());
    }
    rules.push("Keep it fun and engaging.".to_string());

    let mut prompt = format!(
        "Act as Kaleido.\nCONTEXT: User loves {}, speaks {}, learns best with {}.\nTASK: Explain \"{}\".\nRULES:\n",
        interest,
        persona.language.label(),
        persona.style.label(),
        message
    );
    for (i, rule) in rules.iter().enumerate() {
        prompt.push_str(&format!("{}. {}\n", i + 1, rule));
    }
    prompt
}
