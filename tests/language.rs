use std::fs;

use kb::{ErrorKind, Flow, Session, SessionOptions};
use walkdir::WalkDir;

#[test]
fn book_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("book/src").into_iter()
                                .filter_map(Result::ok)
                                .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_kb_blocks(&content).into_iter().enumerate() {
            count += 1;
            let (output, errors) = run(&code);
            if errors > 0 {
                panic!("kb example {} in {:?} failed:\n{}\nOutput:{}", i + 1, path, code, output);
            }
        }
    }

    assert!(count > 0, "No kb examples found in book/src");
}

fn extract_kb_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```kb") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

/// Runs `src` in a fresh test-mode session; returns the output and the
/// number of errors reported.
fn run(src: &str) -> (String, usize) {
    let mut session = Session::new(SessionOptions { test_mode: true });
    let mut out = Vec::new();
    session.run(src, &mut out).unwrap();
    (String::from_utf8(out).unwrap(), session.errors())
}

fn assert_success(src: &str) -> String {
    let (output, errors) = run(src);
    if errors > 0 {
        panic!("Script failed:{output}");
    }
    output
}

fn assert_failure(src: &str, kind: ErrorKind) {
    let (output, errors) = run(src);
    if errors == 0 {
        panic!("Script succeeded but was expected to fail:{output}")
    }
    assert!(output.contains(&format!("\n{kind}: ")) || output.starts_with(&format!("{kind}: ")),
            "expected a {kind} in:{output}");
}

fn rule() -> String {
    "-".repeat(80)
}

#[test]
fn assignment_then_lookup() {
    let output = assert_success("x = 5\nx");
    let second = output.split(&format!("{}\n", rule())).nth(1).unwrap();
    assert_eq!(second, "\n<symbol:x>\n\n<integer:5>\n");
}

#[test]
fn assignment_echoes_quoted_target() {
    let output = assert_success("x = 5");
    assert_eq!(output,
               format!("\n<op:=>\n\t0 = <op:`>\n\t\t0 = <symbol:x>\n\t1 = <integer:5>\n\n<integer:5>\n{}\n",
                       rule()));
}

#[test]
fn push_returns_left_with_new_last_child() {
    let output = assert_success("a = 'A'\nb = 'B'\na // b");
    assert!(output.ends_with(&format!("\n<string:A>\n\t0 = <string:B>\n{}\n", rule())));
}

#[test]
fn binds_key_by_kind_and_value() {
    let output = assert_success("h = 'h'\nh << 'text'\nh >> 0xff");
    assert!(output.contains("\n<string:h>\n\tstring = <string:text>\n\t255 = <hex:0xff>\n"));
}

#[test]
fn literals_round_trip() {
    let output = assert_success("0xDeadBeef\n0b1101\n-42\n2.5");
    for header in ["<hex:0xdeadbeef>", "<bin:0b1101>", "<integer:-42>", "<number:2.5>"] {
        assert_eq!(output.matches(header).count(), 2, "{header}");
    }
}

#[test]
fn scope_contains_itself() {
    let output = assert_success("scope");
    assert!(output.contains("\n\tscope = <scope:kb> _/"));
}

#[test]
fn classes_mint_leaves() {
    let output = assert_success("p = port:8080\np\nip:127.0.0.1");
    assert!(output.contains("\n<port:8080>\n"));
    assert!(output.contains("\n<ip:127.0.0.1>\n"));
}

#[test]
fn quote_suppresses_lookup() {
    let output = assert_success("`nowhere");
    assert!(output.ends_with(&format!("\n<symbol:nowhere>\n{}\n", rule())));
}

#[test]
fn multi_line_vector() {
    let output = assert_success("v = [\n  'a'\n  'b'\n]\nv");
    assert!(output.ends_with(&format!("\n<vector:>\n\t0 = <string:a>\n\t1 = <string:b>\n{}\n",
                                      rule())));
}

#[test]
fn end_stops_the_program() {
    let mut session = Session::new(SessionOptions { test_mode: true });
    let mut out = Vec::new();
    assert_eq!(session.run("a = 1\n.end\nmissing", &mut out).unwrap(), Flow::Halt);
    assert_eq!(session.errors(), 0);
}

#[test]
fn unbound_symbol_is_lookup_error() {
    assert_failure("missing", ErrorKind::Lookup);
}

#[test]
fn applying_a_literal_is_type_error() {
    assert_failure("s = 'text'\ns:x", ErrorKind::Type);
    assert_failure("number:abc", ErrorKind::Type);
}

#[test]
fn evaluating_a_class_returns_it() {
    assert_success("port");
}

#[test]
fn malformed_input_is_syntax_error() {
    assert_failure("// a", ErrorKind::Syntax);
    assert_failure("'unterminated", ErrorKind::Syntax);
    assert_failure("a b", ErrorKind::Syntax);
    assert_failure("[a", ErrorKind::Syntax);
    assert_failure("x\u{1}", ErrorKind::Syntax);
}

#[test]
fn classes_keep_integer_values() {
    let output = assert_success("hex:0xff\nbin:0b101\nhex:255\ninteger:0b11");
    assert!(output.contains(&format!("\n\n<hex:0xff>\n{}\n", rule())));
    assert!(output.contains(&format!("\n\n<bin:0b101>\n{}\n", rule())));
    assert!(output.contains(&format!("\n\n<integer:3>\n{}\n", rule())));
    assert!(!output.contains("0x255"));
}

#[test]
fn multibyte_class_argument_is_type_error() {
    assert_failure("hex:xé", ErrorKind::Type);
    assert_failure("bin:xé", ErrorKind::Type);
}
