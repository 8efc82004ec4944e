use super::{meta, params, params_of, value, Params, TestMeta, TestResource, MESSAGE};
use crate::{
    DataView, EmptyView, ErrorView, Field, FieldRender, FieldView, MatchingProps, Resource,
    ResourceRender, ResourceView, ValidationRender, ValidationView, NO_RESULTS_MESSAGE,
};

struct TextView;

fn describe_props(props: &Params) -> String {
    props
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(",")
}

impl ResourceView<Params, Params, TestMeta, Params> for TextView {
    type Output = String;

    fn query(&self, props: Params) -> String {
        format!("loading [{}]", describe_props(&props))
    }

    fn empty(&self, empty: EmptyView<'_, Params, TestMeta>, props: Params) -> String {
        format!(
            "{} for {} [{}]",
            empty.message,
            describe_props(empty.params),
            describe_props(&props)
        )
    }

    fn data(&self, data: DataView<'_, Params, Params, TestMeta>, props: Params) -> String {
        format!(
            "{} ({:?}) [{}]",
            describe_props(data.value),
            data.meta,
            describe_props(&props)
        )
    }

    fn error(&self, error: ErrorView<'_, Params, TestMeta>, props: Params) -> String {
        format!("failed: {} [{}]", error.messages.join("; "), describe_props(&props))
    }
}

#[test]
fn test_render_dispatches_each_variant() {
    let view = TextView;
    let render = ResourceRender::new(&view, params_of(&[("theme", "dark")]));

    let query: TestResource = Resource::new_query(params());
    assert_eq!(render.render(&query), "loading [theme=dark]");

    let empty: TestResource = Resource::new_empty(params());
    assert_eq!(
        render.render(&empty),
        format!("{NO_RESULTS_MESSAGE} for value=value  [theme=dark]")
    );

    let data: TestResource = Resource::new_data(value(), params()).with_meta(meta());
    assert_eq!(render.render(&data), "foo=bar (Some(Page(1))) [theme=dark]");

    let error: TestResource = Resource::new_error([MESSAGE, "retry later"], params());
    assert_eq!(
        render.render(&error),
        format!("failed: {MESSAGE}; retry later [theme=dark]")
    );
}

#[test]
fn test_render_merges_matching_props_over_base_props() {
    let view = TextView;
    let matching = MatchingProps {
        query: params_of(&[("spinner", "small")]),
        error: params_of(&[("theme", "alert")]),
        ..MatchingProps::default()
    };
    let render =
        ResourceRender::new(&view, params_of(&[("theme", "dark")])).with_matching(matching);

    let query: TestResource = Resource::new_query(params());
    assert_eq!(render.render(&query), "loading [spinner=small,theme=dark]");

    let error: TestResource = Resource::new_error([MESSAGE], params());
    assert_eq!(render.render(&error), format!("failed: {MESSAGE} [theme=alert]"));

    let data: TestResource = Resource::new_data(value(), params());
    assert_eq!(render.render(&data), "foo=bar (None) [theme=dark]");
}

struct InputView;

impl FieldView<String, bool> for InputView {
    type Output = String;

    fn editing(&self, value: &String, temp: &String, disabled: bool) -> String {
        format!("<input value={temp} original={value} disabled={disabled}>")
    }

    fn read_only(&self, value: &String, _disabled: bool) -> String {
        format!("<span>{value}</span>")
    }

    fn saving(&self, value: &String, _disabled: bool) -> String {
        format!("<span busy>{value}</span>")
    }

    fn error(&self, messages: &[String], value: &String, disabled: bool) -> String {
        format!(
            "<input value={value} disabled={disabled} error={}>",
            messages.join(",")
        )
    }
}

#[test]
fn test_field_render_dispatches_each_variant() {
    let view = InputView;
    let render = FieldRender::new(&view, false);

    let editing = Field::editable_with("Ann".to_string(), "Anna".to_string());
    assert_eq!(render.render(&editing), "<input value=Anna original=Ann disabled=false>");
    assert_eq!(render.render(&Field::read_only("Ann".to_string())), "<span>Ann</span>");
    assert_eq!(render.render(&Field::saving("Anna".to_string())), "<span busy>Anna</span>");
    assert_eq!(
        render.render(&Field::error(["taken"], "Anna".to_string())),
        "<input value=Anna disabled=false error=taken>"
    );
}

struct HintView;

impl ValidationView<String, &'static str> for HintView {
    type Output = String;

    fn success(&self, value: &String, label: &'static str) -> String {
        format!("{label}: {value}")
    }

    fn failure(&self, messages: &[String], label: &'static str) -> String {
        format!("{label}: {}", messages.join(" / "))
    }
}

#[test]
fn test_validation_render_picks_success_or_failure() {
    let view = HintView;
    let render = ValidationRender::new(&view, "name");

    assert_eq!(render.render(&Ok("Ann".to_string())), "name: Ann");
    assert_eq!(
        render.render(&Err::<String, _>(vec!["taken".to_string(), "too short".to_string()])),
        "name: taken / too short"
    );

    let rejected = Field::error(["taken"], "Ann".to_string());
    assert_eq!(render.render_field(&rejected), "name: taken");
    let editing = Field::editable_with("Ann".to_string(), "Anna".to_string());
    assert_eq!(render.render_field(&editing), "name: Ann");
}
