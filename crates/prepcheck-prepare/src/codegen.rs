//! Imperative cleaning-script generation.

use std::collections::BTreeSet;

use prepcheck_model::FixSuggestion;

use crate::strategies::strategy_for;

/// Renders an `apply_fixes` pandas script for the given suggestions, in
/// order. Imports are hoisted and deduplicated; each fix is preceded by a
/// comment carrying its reason.
pub fn generate_fix_script(suggestions: &[FixSuggestion]) -> String {
    let mut imports: BTreeSet<&'static str> = BTreeSet::new();
    imports.insert("import pandas as pd");
    for fix in suggestions {
        for import in strategy_for(fix.fix_type).imports(fix) {
            imports.insert(import);
        }
    }

    let mut out = String::new();
    out.push_str("\"\"\"Auto-generated data cleaning script.\"\"\"\n");
    for import in &imports {
        out.push_str(import);
        out.push('\n');
    }
    out.push('\n');
    out.push('\n');
    out.push_str("def apply_fixes(df: pd.DataFrame) -> pd.DataFrame:\n");
    out.push_str("    \"\"\"Apply the suggested fixes in priority order.\"\"\"\n");
    if suggestions.is_empty() {
        out.push_str("    return df\n");
        return out;
    }
    for fix in suggestions {
        if !fix.reason.is_empty() {
            out.push_str(&format!(
                "    # {} ({}): {}\n",
                fix.fix_type,
                fix.columns.join(", "),
                fix.reason
            ));
        }
        let code = strategy_for(fix.fix_type).pandas_code(fix);
        for line in code.lines() {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("    return df\n");
    out.push('\n');
    out.push('\n');
    out.push_str("if __name__ == \"__main__\":\n");
    out.push_str("    import sys\n");
    out.push('\n');
    out.push_str("    frame = pd.read_csv(sys.argv[1])\n");
    out.push_str("    apply_fixes(frame).to_csv(\"cleaned.csv\", index=False)\n");
    out
}
