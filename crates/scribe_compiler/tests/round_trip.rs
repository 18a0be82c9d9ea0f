//! Round-trip stability.
//!
//! For every construct: render(parse(s)) must be syntactically equivalent
//! to s under default settings. Equivalence is whitespace-insensitive —
//! both sides are re-tokenized and compared token by token. Minified
//! output is byte-exact for a fixed settings object.

use scribe_ast::token_kind::TokenKind;
use scribe_compiler::Compiler;
use scribe_core::text::SourceOrigin;
use scribe_options::EmitOptions;
use scribe_scanner::tokenize;

fn token_stream(text: &str) -> Vec<(TokenKind, String)> {
    tokenize(text, &SourceOrigin::default())
        .unwrap_or_else(|err| panic!("tokenize failed for {:?}: {}", text, err))
        .into_iter()
        .map(|token| (token.kind, token.text))
        .collect()
}

fn assert_round_trip(source: &str) {
    let compiler = Compiler::default();
    let module = compiler
        .parse_text(source, "roundtrip.ts")
        .unwrap_or_else(|err| panic!("parse failed for {:?}: {}", source, err));
    let rendered = compiler.emit(&module).unwrap();
    assert_eq!(
        token_stream(source),
        token_stream(&rendered),
        "\nsource:   {}\nrendered: {}",
        source,
        rendered
    );
}

fn assert_minified(source: &str, expected: &str) {
    let compiler = Compiler::new(EmitOptions::minified());
    let module = compiler.parse_text(source, "minify.ts").unwrap();
    assert_eq!(compiler.emit(&module).unwrap(), expected);
}

// ============================================================================
// Whitespace-insensitive round trips
// ============================================================================

#[test]
fn test_round_trip_variables() {
    assert_round_trip("const x = 42;");
    assert_round_trip("let y = 'hello';");
    assert_round_trip("var ok = true;");
    assert_round_trip("let a = 1, b = 2;");
    assert_round_trip("const big = 10_000n;");
}

#[test]
fn test_round_trip_expressions() {
    assert_round_trip("const sum = 2 + 3 * 5;");
    assert_round_trip("const cmp = a < b && c > d;");
    assert_round_trip("const bits = (mask | flag) & ~other;");
    assert_round_trip("const pick = ok ? left : right;");
    assert_round_trip("const nested = a ? b : c ? d : e;");
    assert_round_trip("count = count + 1;");
    assert_round_trip("total += delta;");
    assert_round_trip("const fallback = box?.width ?? 0;");
    assert_round_trip("items[0].flush();");
    assert_round_trip("merge(...parts);");
    assert_round_trip("const quotient = x / 2;");
    assert_round_trip("const keyed = name in table;");
    assert_round_trip("const checked = shape instanceof Circle;");
}

#[test]
fn test_round_trip_precedence_with_groups() {
    assert_round_trip("const scaled = (1 + 2) * 3;");
    assert_round_trip("const spread = -(a + b);");
}

#[test]
fn test_round_trip_functions() {
    assert_round_trip("function add(a, b) {\n    return a + b;\n}");
    assert_round_trip("async function go() {\n    await task();\n}");
    assert_round_trip("function* gen() {\n    yield 1;\n}");
    assert_round_trip("const f = x => x + 1;");
    assert_round_trip("const g = (a, b) => a * b;");
    assert_round_trip("const h = async job => job.run();");
}

#[test]
fn test_round_trip_control_flow() {
    assert_round_trip("if (a) {\n    b();\n} else {\n    c();\n}");
    assert_round_trip("if (a) {\n    x();\n} else if (b) {\n    y();\n} else {\n    z();\n}");
    assert_round_trip("for (let i = 0; i < 10; i++) {\n    visit(i);\n}");
    assert_round_trip("for (const item of list) {\n    use(item);\n}");
    assert_round_trip("for (const key in table) {\n    use(key);\n}");
    assert_round_trip("while (more()) {\n    step();\n}");
    assert_round_trip("do {\n    step();\n} while (more());");
    assert_round_trip("try {\n    risky();\n} catch (err) {\n    log(err);\n} finally {\n    done();\n}");
    assert_round_trip("throw new Error(\"bad\");");
    assert_round_trip(
        "switch (kind) {\n    case 1:\n        first();\n    default:\n        rest();\n        break;\n}",
    );
}

#[test]
fn test_round_trip_classes() {
    assert_round_trip(
        "class Point {\n    x: number = 0;\n    constructor(x: number) {\n        this.x = x;\n    }\n    get magnitude(): number {\n        return this.x;\n    }\n    static origin(): Point {\n        return new Point(0);\n    }\n}",
    );
    assert_round_trip("abstract class Shape {\n    abstract area(): number;\n}");
    assert_round_trip("class Panel extends Widget implements Drawable {}");
    assert_round_trip("@component\nclass Tagged {}");
}

#[test]
fn test_round_trip_type_declarations() {
    assert_round_trip("interface User {\n    id: number;\n    name?: string;\n    greet(prefix: string): string;\n}");
    assert_round_trip("enum Color {\n    Red,\n    Green,\n    Blue,\n}");
    assert_round_trip("type Id = string | number;");
    assert_round_trip("type Pair = [string, number];");
    assert_round_trip("type Nested = Map<string, Array<number>>;");
    assert_round_trip("type Deep = A<B<C<number>>>;");
    assert_round_trip("type Handler = (event: Event) => void;");
}

#[test]
fn test_round_trip_modules() {
    assert_round_trip("import \"./reset\";");
    assert_round_trip("import * as util from \"./util\";");
    assert_round_trip("import Def, { named } from \"./lib\";");
    assert_round_trip("import { render, mount as attach } from \"./dom\";");
    assert_round_trip("export const version = 3;");
    assert_round_trip("export default function main() {}");
    assert_round_trip("export class App {}");
}

#[test]
fn test_round_trip_literals() {
    assert_round_trip("const msg = `Hello ${name}, you have ${count} items`;");
    assert_round_trip("const pattern = /ab+c/gi;");
    assert_round_trip("const table = { id: 1, \"quoted\": 2, [computed]: 3, shorthand };");
    assert_round_trip("const list = [1, , 2];");
    assert_round_trip("const clone = { ...base, extra: true };");
}

#[test]
fn test_round_trip_destructuring() {
    assert_round_trip("const [a, , b] = arr;");
    assert_round_trip("const [, second] = pair;");
    assert_round_trip("const { id, name: alias, ...rest } = user;");
}

#[test]
fn test_round_trip_generics_and_casts() {
    assert_round_trip("const set = new Set<string>();");
    assert_round_trip("first<string>(input);");
    assert_round_trip("const width = (value as Widget).width;");
}

// ============================================================================
// Byte-exact minified output
// ============================================================================

#[test]
fn test_minified_expression() {
    assert_minified("const x = 1 + 2 * 3;", "const x=1+2*3;");
}

#[test]
fn test_minified_branches() {
    assert_minified("if (ready) { go(); } else { wait(); }", "if(ready){go();}else{wait();}");
}

#[test]
fn test_minified_ternary_and_loop() {
    assert_minified("const r = ok ? a : b;", "const r=ok?a:b;");
    assert_minified("for (let i = 0; i < n; i++) { f(i); }", "for(let i=0;i<n;i++){f(i);}");
}

#[test]
fn test_minified_word_operators_keep_spaces() {
    assert_minified("const t = a instanceof B;", "const t=a instanceof B;");
    assert_minified("const k = key in table;", "const k=key in table;");
}

#[test]
fn test_minified_generator_method_gets_separator() {
    assert_minified(
        "class G { first() {} *gen() { yield 1; } }",
        "class G{first(){};*gen(){yield 1;}}",
    );
}

#[test]
fn test_minified_is_deterministic() {
    let compiler = Compiler::new(EmitOptions::minified());
    let module = compiler.parse_text("const x = f(a, b) + 1;", "det.ts").unwrap();
    let first = compiler.emit(&module).unwrap();
    let second = compiler.emit(&module).unwrap();
    assert_eq!(first, second);
}
