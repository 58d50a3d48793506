use kb::{Kind, NodeRef, evaluate, graph::scalar::Scalar, parse, root_scope};

#[test]
fn fresh_leaf_renders_its_header() {
    for kind in Kind::ALL {
        let node = NodeRef::new(kind, "v");
        assert_eq!(node.render(true), format!("\n<{kind}:v>"));
    }
}

#[test]
fn kind_names_parse_back() {
    for kind in Kind::ALL {
        assert_eq!(kind.name().parse::<Kind>(), Ok(kind));
    }
    assert!("widget".parse::<Kind>().is_err());
}

#[test]
fn push_nests_one_level_deeper() {
    let a = NodeRef::symbol("A");
    let b = NodeRef::string("B");
    a.push(&b);
    assert_eq!(a.render(true), "\n<symbol:A>\n\t0 = <string:B>");
}

#[test]
fn bind_keys() {
    let a = NodeRef::symbol("A");
    let url = NodeRef::new(Kind::Url, "http://example.org");
    a.bind_by_kind(&url).bind_by_value(&NodeRef::bin(5));
    assert!(a.get_attribute("url").unwrap().ptr_eq(&url));
    let five = a.get_attribute("5").unwrap();
    assert_eq!(five.value(), Scalar::Integer(5.into()));
    assert_eq!(five.render(true), "\n<bin:0b101>");
}

#[test]
fn mutual_cycle_terminates() {
    let a = NodeRef::symbol("a");
    let b = NodeRef::symbol("b");
    a.push(&b);
    b.push(&a);
    assert_eq!(a.render(true), "\n<symbol:a>\n\t0 = <symbol:b>\n\t\t0 = <symbol:a> _/");
    assert_eq!(b.render(true), "\n<symbol:b>\n\t0 = <symbol:a>\n\t\t0 = <symbol:b> _/");
}

#[test]
fn radix_literals_round_trip() {
    let program = parse("0xDeadBeef\n0b1101\n1234").unwrap();
    let renders: Vec<String> = program.iter().map(|node| node.render(true)).collect();
    assert_eq!(renders, ["\n<hex:0xdeadbeef>", "\n<bin:0b1101>", "\n<integer:1234>"]);

    let negative = NodeRef::from_text(Kind::Hex, "-0x10").unwrap();
    assert_eq!(negative.render(true), "\n<hex:-0x10>");
}

#[test]
fn assignment_returns_the_bound_node() {
    let scope = root_scope();
    let program = parse("x = 'value'\nx").unwrap();
    let bound = evaluate(&program[0], &scope).unwrap();
    let looked_up = evaluate(&program[1], &scope).unwrap();
    assert!(bound.ptr_eq(&looked_up));
}

#[test]
fn evaluation_mutates_the_parsed_graph() {
    let scope = root_scope();
    let program = parse("v = [a]\nv // 'b'").unwrap();
    for expression in &program {
        evaluate(expression, &scope).unwrap();
    }
    let vector = scope.get_attribute("v").unwrap();
    assert_eq!(vector.render(true), "\n<vector:>\n\t0 = <symbol:a>\n\t1 = <string:b>");
}
