//! Output formatting utilities for the CLI.

use serde::Serialize;

pub trait CommandOutput: Serialize {
    fn to_human(&self) -> String;
    fn to_json(&self) -> serde_json::Value;
}

pub fn output<T: CommandOutput>(result: &T, json_mode: bool) {
    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&result.to_json()).unwrap_or_default()
        );
    } else {
        println!("{}", result.to_human());
    }
}

/// Keep the first few characters of a secret so it can be recognized.
pub fn mask_secret(secret: &str) -> String {
    const VISIBLE: usize = 4;
    let total = secret.chars().count();
    if total <= VISIBLE * 2 {
        return "*".repeat(total);
    }
    let head: String = secret.chars().take(VISIBLE).collect();
    format!("{head}... ({total} chars)")
}
