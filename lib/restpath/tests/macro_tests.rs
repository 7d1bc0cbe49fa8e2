//! Integration tests for the `path!` macro.

use restpath::{Path, PathProxy, Segment, handler_fn, path};

fn echo() -> PathProxy<impl restpath::PathHandler<Args = (), Output = String>> {
    PathProxy::new(handler_fn(|path: Path, (): ()| path.to_string()))
}

#[test]
fn test_members_and_indices() {
    let proxy = echo();
    assert_eq!(path!(proxy, people[123].phones).call(()), "/people/123/phones");
}

#[test]
fn test_same_as_explicit_chain() {
    let proxy = echo();
    let id = 42_u64;
    assert_eq!(
        path!(proxy, people[id].phones).path(),
        proxy.at("people").at(id).at("phones").path()
    );
}

#[test]
fn test_reserved_words() {
    let proxy = echo();
    assert_eq!(path!(proxy, r#type.r#fn.self_).call(()), "/type/fn/self_");
    assert_eq!(path!(proxy, r#match[1]).call(()), "/match/1");
}

#[test]
fn test_string_indices() {
    let proxy = echo();
    let name = String::from("ada");
    assert_eq!(
        path!(proxy, config["feature-flags"][&name]).call(()),
        "/config/feature-flags/ada"
    );
}

#[test]
fn test_tuple_member() {
    let proxy = echo();
    assert_eq!(path!(proxy, versions.0).call(()), "/versions/0");
}

#[test]
fn test_extends_an_existing_proxy() {
    let proxy = echo();
    let people = path!(proxy, people);
    let phones = path!(people.at(7), phones.list);

    assert_eq!(phones.call(()), "/people/7/phones/list");
    assert_eq!(people.call(()), "/people");
}

#[test]
fn test_segment_expression() {
    let proxy = echo();
    let segment = Segment::from("x y");
    assert_eq!(path!(proxy, items[segment]).call(()), "/items/x%20y");
}
