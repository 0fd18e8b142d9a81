//! Classification of whole source files.

use docinfo::{Flag, Info, InfoKind, SourceInfo, Value, get_source_info};

fn classify(text: &str) -> SourceInfo {
    get_source_info("/src/main.ts", text, false)
}

fn kinds(code: &[Info]) -> Vec<InfoKind> {
    code.iter().map(Info::kind).collect()
}

#[test]
fn attaches_the_nearest_doclet() {
    let source = classify("/** First. */\n/** Second. */\nconst answer = 42;\n");

    assert_eq!(kinds(&source.code), [InfoKind::Doclet, InfoKind::Variable]);
    let Info::Variable(answer) = &source.code[1] else {
        panic!("expected a variable");
    };
    assert_eq!(answer.name, "answer");
    assert_eq!(answer.doclet.as_ref().unwrap().description(), Some("Second."));
    assert_eq!(answer.value, Some(Value::Literal("42".into())));
    assert_eq!(source.code[0].doclet().unwrap().description(), Some("First."));
}

#[test]
fn option_doclets_stay_free_standing() {
    let source = classify("/**\n * @apioption chart.width\n */\nconst chart = {};\n");

    assert_eq!(kinds(&source.code), [InfoKind::Doclet, InfoKind::Variable]);
    assert!(source.code[0].doclet().unwrap().is_apioption());
    assert!(source.code[1].doclet().is_none());
}

#[test]
fn trailing_doclets_are_recovered() {
    let source = classify("let a = 1;\n/** @apioption tail */\n");

    assert_eq!(kinds(&source.code), [InfoKind::Variable, InfoKind::Doclet]);
    let meta = source.code[1].meta().unwrap();
    assert_eq!(meta.trivia, 1);
}

#[test]
fn trivia_covers_the_gap_before_a_record() {
    let text = "let a = 1;\n\n  /** Doc. */\n  let b = 2;\n";
    let source = classify(text);

    let meta = source.code[1].meta().unwrap();
    assert_eq!(&text[meta.begin as usize..meta.end as usize], "let b = 2;");
    assert_eq!(meta.full_begin(), 10);
}

#[test]
fn imports_map_exported_to_local_names() {
    let source = classify(
        "import { Foo as Bar, Baz } from './other.js';\nimport Chart, * as all from '../chart';\n",
    );

    let Info::Import(first) = &source.code[0] else {
        panic!("expected an import");
    };
    assert_eq!(first.from, "./other");
    assert_eq!(first.imports.get("Foo").map(String::as_str), Some("Bar"));
    assert_eq!(first.imports.get("Baz").map(String::as_str), Some("Baz"));

    let Info::Import(second) = &source.code[1] else {
        panic!("expected an import");
    };
    assert_eq!(second.from, "../chart");
    assert_eq!(second.imports.get("default").map(String::as_str), Some("Chart"));
    assert_eq!(second.imports.get("*").map(String::as_str), Some("all"));
}

#[test]
fn imports_never_take_doclets() {
    let source = classify("/** Not mine. */\nimport { a } from './a';\n");

    assert_eq!(kinds(&source.code), [InfoKind::Doclet, InfoKind::Import]);
    assert!(source.code[1].doclet().is_none());
}

#[test]
fn classes_collect_members() {
    let source = classify(
        r#"
/** A widget. */
export class Widget extends Base<Options> implements Sized {
    /** Width. */
    public width: number = 1;
    private static count = 0;
    constructor(options: Options) {
        super();
    }
    /** Draws. */
    async draw(force?: boolean): Promise<void> {}
}
"#,
    );

    let Info::Class(widget) = &source.code[0] else {
        panic!("expected a class");
    };
    assert_eq!(widget.name, "Widget");
    assert_eq!(widget.flags, [Flag::Export]);
    assert_eq!(widget.extends.as_deref(), Some(&["Base<Options>".to_string()][..]));
    assert_eq!(widget.implements.as_deref(), Some(&["Sized".to_string()][..]));
    assert_eq!(widget.doclet.as_ref().unwrap().description(), Some("A widget."));

    let names: Vec<_> = widget.properties.iter().filter_map(Info::name).collect();
    assert_eq!(names, ["width", "count", "constructor", "draw"]);

    let Info::Property(width) = &widget.properties[0] else {
        panic!("expected a property");
    };
    assert_eq!(width.r#type.as_deref(), Some("number"));
    assert_eq!(width.flags, [Flag::Public]);
    assert_eq!(width.doclet.as_ref().unwrap().description(), Some("Width."));

    assert!(widget.properties[1].has_flag(Flag::Private));
    assert!(widget.properties[1].has_flag(Flag::Static));

    let Info::Function(draw) = &widget.properties[3] else {
        panic!("expected a method");
    };
    assert_eq!(draw.flags, [Flag::Async]);
    assert_eq!(draw.return_type.as_deref(), Some("Promise<void>"));
    let parameters = draw.parameters.as_ref().unwrap();
    let Info::Variable(force) = &parameters[0] else {
        panic!("expected a parameter");
    };
    assert_eq!(force.name, "force");
    assert_eq!(force.r#type.as_deref(), Some("boolean"));
    assert_eq!(force.flags, [Flag::Optional]);
}

#[test]
fn interfaces_and_object_type_aliases() {
    let source = classify(
        r#"
export interface Options extends Base, Partial<Other> {
    /** The title. */
    title?: string;
    readonly size: number;
    render<T>(value: T): string;
}
type Point = { x: number; y: number };
type Alias = string;
"#,
    );

    assert_eq!(kinds(&source.code), [InfoKind::Interface, InfoKind::Interface]);

    let Info::Interface(options) = &source.code[0] else {
        panic!("expected an interface");
    };
    assert_eq!(
        options.extends.as_deref(),
        Some(&["Base".to_string(), "Partial<Other>".to_string()][..])
    );
    let Info::Property(title) = &options.properties[0] else {
        panic!("expected a property");
    };
    assert_eq!(title.flags, [Flag::Optional]);
    assert_eq!(title.doclet.as_ref().unwrap().description(), Some("The title."));
    assert!(options.properties[1].has_flag(Flag::Readonly));
    let Info::Property(render) = &options.properties[2] else {
        panic!("expected a method signature");
    };
    assert_eq!(render.r#type.as_deref(), Some("<T>(value: T) => string"));

    assert_eq!(source.code[1].name(), Some("Point"));
    assert_eq!(source.code[1].properties().unwrap().len(), 2);
}

#[test]
fn objects_keep_casts_and_nested_records() {
    let source = classify(
        "const defaults = {\n    /** Zoom. */\n    zoom: 1,\n    nested: { on: true },\n    run() {},\n} as Options;\n",
    );

    let Info::Variable(defaults) = &source.code[0] else {
        panic!("expected a variable");
    };
    let Some(Info::Object(object)) = defaults.value.as_ref().and_then(Value::as_info) else {
        panic!("expected an object value");
    };
    assert_eq!(object.r#type.as_deref(), Some("Options"));
    let names: Vec<_> = object.properties.iter().filter_map(Info::name).collect();
    assert_eq!(names, ["zoom", "nested", "run"]);
    assert_eq!(
        object.properties[0].doclet().unwrap().description(),
        Some("Zoom.")
    );

    let Info::Property(nested) = &object.properties[1] else {
        panic!("expected a property");
    };
    assert!(matches!(
        nested.value.as_ref().and_then(Value::as_info),
        Some(Info::Object(_))
    ));
}

#[test]
fn destructuring_maps_keys_to_names() {
    let source =
        classify("const { a, b: { c }, ...rest } = options;\nconst [first, , third] = list;\n");

    let Info::Deconstruct(object) = &source.code[0] else {
        panic!("expected a destructuring");
    };
    assert_eq!(object.from.as_deref(), Some("options"));
    let pairs: Vec<_> = object
        .deconstructs
        .iter()
        .map(|(key, name)| (key.as_str(), name.as_str()))
        .collect();
    assert_eq!(pairs, [("a", "a"), ("b.c", "c"), ("...", "rest")]);

    let Info::Deconstruct(array) = &source.code[1] else {
        panic!("expected a destructuring");
    };
    assert_eq!(array.deconstructs.get("0").map(String::as_str), Some("first"));
    assert_eq!(array.deconstructs.get("2").map(String::as_str), Some("third"));
    assert_eq!(array.deconstructs.len(), 2);
}

#[test]
fn functions_and_parameters() {
    let source = classify(
        "export async function load<T extends object = {}>(url: string, { retries = 3 }: Options, ...rest: any[]): Promise<T> {}\nexport const handler = (event: Event) => {};\n",
    );

    let Info::Function(load) = &source.code[0] else {
        panic!("expected a function");
    };
    assert_eq!(load.name, "load");
    assert_eq!(load.flags, [Flag::Export, Flag::Async]);
    assert_eq!(load.return_type.as_deref(), Some("Promise<T>"));

    let generics = load.generics.as_ref().unwrap();
    assert_eq!(generics[0].name, "T");
    assert_eq!(generics[0].r#type.as_deref(), Some("object"));
    assert_eq!(generics[0].value, Some(Value::Literal("{}".into())));

    let parameters = load.parameters.as_ref().unwrap();
    assert_eq!(
        kinds(parameters),
        [InfoKind::Variable, InfoKind::Deconstruct, InfoKind::Variable]
    );
    assert_eq!(parameters[2].name(), Some("...rest"));

    let Info::Variable(handler) = &source.code[1] else {
        panic!("expected a variable");
    };
    assert!(matches!(
        handler.value.as_ref().and_then(Value::as_info),
        Some(Info::Function(function)) if function.name == "handler"
    ));
}

#[test]
fn default_exports() {
    let named = classify("class Chart {}\nexport default Chart;\n");
    let Info::Export(export) = &named.code[1] else {
        panic!("expected an export");
    };
    assert_eq!(export.name.as_deref(), Some("Chart"));
    assert!(export.object.is_none());
    assert_eq!(export.flags, [Flag::Export, Flag::Default]);

    let anonymous = classify("export default class {}\n");
    let Info::Class(class) = &anonymous.code[0] else {
        panic!("expected a class");
    };
    assert_eq!(class.name, "default");
    assert_eq!(class.flags, [Flag::Export, Flag::Default]);

    let object = classify("export default { a: 1 } as Options;\n");
    let Info::Export(export) = &object.code[0] else {
        panic!("expected an export");
    };
    assert!(matches!(export.object.as_deref(), Some(Info::Object(_))));
}

#[test]
fn node_text_is_captured_on_request() {
    let text = "export const x = 1;\n";
    let with_nodes = get_source_info("/src/main.ts", text, true);
    let meta = with_nodes.code[0].meta().unwrap();
    assert_eq!(meta.text.as_deref(), Some("export const x = 1;"));

    assert!(classify(text).code[0].meta().unwrap().text.is_none());
}

#[test]
fn syntax_errors_do_not_fail() {
    let source = classify("const = ;");
    assert_eq!(source.path.to_str(), Some("/src/main.ts"));
}
