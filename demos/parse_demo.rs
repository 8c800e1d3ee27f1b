//! Demonstrates running the analysis pipeline on a few declaration snippets

use declc::analyze;

fn main() {
    let examples = vec![
        ("Valid declarations", "int count = 10;\nfloat ratio = 0.5;\nbool ready = true;"),
        ("Type mismatch", "string name = 42;"),
        ("Missing identifier", "int = 5;"),
        ("Variable initializer", "int a = 1;\ndouble b = a;\nchar c = b;"),
        ("Lexical error", "char c = @;"),
    ];

    for (name, code) in examples {
        println!("\n=== {} ===", name);
        println!("Code:\n{}\n", code);

        let analysis = analyze(code);
        for declaration in &analysis.program.declarations {
            let node = declaration.as_node();
            let leaves: Vec<_> = node
                .children()
                .iter()
                .filter_map(|child| child.lexeme())
                .collect();
            println!("  {} {}", node.label(), leaves.join(" "));
        }

        if analysis.is_clean() {
            println!("✓ No diagnostics");
        }
        for diagnostic in analysis.diagnostics.all() {
            println!("✗ {}", diagnostic);
        }
    }
}
