use closetag_core::scan::has_odd_open_brackets;
use closetag_lib::{
  config::{
    Config,
    ConfigError,
    DEFAULT_SELF_CLOSE_TAGS,
  },
  document::Document,
  session::{
    Session,
    SessionError,
  },
};
use quickcheck::TestResult;
use serde_json::json;

fn open(marked: &str, name: &str) -> Session<Document> {
  let doc = Document::from_marked(marked).with_display_name(name);
  Session::activate(Config::default(), Some(doc))
}

fn typed(marked: &str, keys: &str) -> String {
  let mut session = open(marked, "index.html");
  session.type_keys(keys).unwrap();
  session.document().unwrap().to_marked()
}

fn tag_name(raw: String) -> Option<String> {
  let name: String = raw
    .chars()
    .filter(char::is_ascii_alphanumeric)
    .take(12)
    .collect();
  let first = name.chars().next()?;
  if !first.is_ascii_alphabetic() {
    return None;
  }
  Some(name)
}

quickcheck::quickcheck! {
    fn closing_tag_follows_open_tag(raw: String) -> TestResult {
        let Some(name) = tag_name(raw) else {
            return TestResult::discard();
        };
        let lower = name.to_lowercase();
        if DEFAULT_SELF_CLOSE_TAGS.contains(&lower.as_str()) {
            return TestResult::discard();
        }
        let result = typed(&format!("<{name}|"), ">");
        TestResult::from_bool(result == format!("<{name}>|</{name}>"))
    }

    fn typing_an_open_tag_closes_it(raw: String) -> TestResult {
        let Some(name) = tag_name(raw) else {
            return TestResult::discard();
        };
        if DEFAULT_SELF_CLOSE_TAGS.contains(&name.to_lowercase().as_str()) {
            return TestResult::discard();
        }
        let result = typed("|", &format!("<{name}>"));
        TestResult::from_bool(result == format!("<{name}>|</{name}>"))
    }
}

#[test]
fn void_elements_self_close() {
  assert_eq!(typed("<br|", ">"), "<br />|");
  assert_eq!(typed("<IMG|", ">"), "<IMG />|");
  assert_eq!(typed("<img|", ">"), "<img />|");

  let mut session = open("<hr|", "index.html");
  session
    .set_config_value("insertWhitespaceOnClose", json!(false))
    .unwrap();
  session.type_keys(">").unwrap();
  assert_eq!(session.document().unwrap().to_marked(), "<hr/>|");

  let mut session = open("<hr|", "index.html");
  session
    .set_config_value("addSlashToSelfCloseTag", json!(false))
    .unwrap();
  session
    .set_config_value("insertWhitespaceOnClose", json!(false))
    .unwrap();
  session.type_keys(">").unwrap();
  assert_eq!(session.document().unwrap().to_marked(), "<hr>|");
}

#[test]
fn slash_self_closes() {
  assert_eq!(typed("<Button disabled |", "/"), "<Button disabled />|");
  assert_eq!(typed("<a href=\"x|", "/"), "<a href=\"x/|");
  assert_eq!(typed("<div |>", "/"), "<div /|>");
}

#[test]
fn arrow_functions_in_props() {
  let doc = Document::from_marked("<button onClick={() => go()}|")
    .with_display_name("App.tsx")
    .with_grammar("source.tsx")
    .with_scopes(["source.tsx", "jsx_opening_element"]);
  let mut session = Session::activate(Config::default(), Some(doc));
  session.type_keys(">").unwrap();
  assert_eq!(
    session.document().unwrap().to_marked(),
    "<button onClick={() => go()}>|</button>"
  );

  assert_eq!(
    typed("<Foo onClick={() => x} |", "/"),
    "<Foo onClick={() => x} />|"
  );
  assert_eq!(
    typed("<li v-if=\"n > 0\"|", ">"),
    "<li v-if=\"n > 0\">|</li>"
  );
}

#[test]
fn bracket_parity() {
  assert!(has_odd_open_brackets("<div"));
  assert!(!has_odd_open_brackets("<div>"));
  assert!(has_odd_open_brackets("<a><b"));
}

#[test]
fn comments() {
  assert_eq!(typed("<html>\n|", "<!"), "<html>\n<!-- | -->");
  assert_eq!(typed("|", "<!"), "<!|");
}

#[test]
fn file_types() {
  let mut session = open("<div|", "App.tsx");
  session
    .set_config_value("enabledFileTypes", json!(["html"]))
    .unwrap();
  session.type_keys(">").unwrap();
  assert_eq!(session.document().unwrap().to_marked(), "<div>|");
}

#[test]
fn newline_between_tags() {
  assert_eq!(typed("<div>|</div>", "\n"), "<div>\n|\n</div>");

  let doc = Document::from_marked("  <div>|</div>")
    .with_display_name("index.html")
    .with_indent(1, true);
  let mut session = Session::activate(Config::default(), Some(doc));
  session.type_keys("\n").unwrap();
  assert_eq!(
    session.document().unwrap().to_marked(),
    "  <div>\n\t|\n</div>"
  );
}

#[test]
fn rejected_updates() {
  let mut session = open("<br|", "index.html");
  let err = session
    .set_config_value("selfCloseTags", json!({ "br": true }))
    .unwrap_err();
  assert!(matches!(
    err,
    SessionError::Config(ConfigError::InvalidValue { .. })
  ));
  assert_eq!(session.config().self_close_tags, ["br", "img", "hr"]);

  session.type_keys(">").unwrap();
  assert_eq!(session.document().unwrap().to_marked(), "<br />|");
}

#[test]
fn jsx_scopes() {
  let doc = Document::from_marked("<Foo|")
    .with_display_name("App.tsx")
    .with_grammar("source.tsx")
    .with_scopes(["source.tsx", "jsx_self_closing_element"]);
  let mut session = Session::activate(Config::default(), Some(doc));
  session.type_keys(">").unwrap();
  assert_eq!(session.document().unwrap().to_marked(), "<Foo>|");
}
