use crate::{Field, FieldPattern, FieldResponse, FieldTag, Lifecycle, ResourceError};

fn editing() -> Field<String> {
    Field::editable_with("saved".to_string(), "typed".to_string())
}

#[test]
fn test_field_constructors() {
    let editable = Field::editable("name".to_string());
    assert_eq!(
        editable,
        Field::Editable {
            value: "name".to_string(),
            temp: "name".to_string(),
        }
    );
    assert!(editable.is_editable());
    assert_eq!(editable.tag(), FieldTag::Editable);

    let read_only = Field::read_only(3);
    assert!(read_only.is_read_only());
    assert!(!read_only.is_failure());

    let saving = Field::saving(3);
    assert!(saving.is_saving());

    let error = Field::error(["taken"], 3);
    assert!(error.is_error());
    assert_eq!(error.messages(), Some(&["taken".to_string()][..]));
}

#[test]
fn test_field_map_edits_only_the_pending_value() {
    let result = editing().map(|temp| format!("{temp}!"));
    assert_eq!(result, Field::editable_with("saved".to_string(), "typed!".to_string()));
    assert_eq!(result.display_ref(), "typed!");
    assert_eq!(result.value_ref(), "saved");

    let read_only = Field::read_only("saved".to_string());
    assert_eq!(read_only.clone().map(|_| "other".to_string()), read_only);

    let saving = Field::saving("saved".to_string());
    assert_eq!(saving.clone().map(|_| "other".to_string()), saving);

    let error = Field::error(["taken"], "saved".to_string());
    assert_eq!(error.clone().map(|_| "other".to_string()), error);
}

#[test]
fn test_field_map_value_applies_to_every_variant() {
    assert_eq!(
        editing().map_value(|value| value.to_uppercase()),
        Field::editable("SAVED".to_string())
    );
    assert_eq!(Field::read_only(1).map_value(|value| value + 1), Field::read_only(2));
    assert_eq!(Field::saving(1).map_value(|value| value + 1), Field::saving(2));
    assert_eq!(Field::error(["taken"], 1).map_value(|value| value + 1), Field::error(["taken"], 2));
}

#[test]
fn test_field_save() {
    assert_eq!(editing().save(), Field::saving("typed".to_string()));
    assert_eq!(Field::read_only(4).save(), Field::saving(4));
    assert_eq!(Field::saving(4).save(), Field::saving(4));
    assert_eq!(Field::error(["taken"], 4).save(), Field::error(["taken"], 4));
}

#[test]
fn test_field_edit() {
    assert_eq!(Field::read_only(4).edit(), Field::editable_with(4, 4));
    assert_eq!(editing().edit(), editing());
    assert_eq!(Field::saving(4).edit(), Field::saving(4));
    assert_eq!(Field::error(["taken"], 4).edit(), Field::error(["taken"], 4));
}

#[test]
fn test_field_revert() {
    assert_eq!(editing().revert(), Field::read_only("saved".to_string()));
    assert_eq!(Field::error(["taken"], 4).revert(), Field::read_only(4));
    assert_eq!(Field::read_only(4).revert(), Field::read_only(4));
    assert_eq!(Field::saving(4).revert(), Field::saving(4));
}

#[test]
fn test_field_tap_sees_committed_value() {
    let mut seen = Vec::new();
    let field = editing().tap(|value| seen.push(value.clone()));
    assert_eq!(field, editing());
    Field::error(["taken"], "rejected".to_string()).tap(|value| seen.push(value.clone()));
    assert_eq!(seen, vec!["saved".to_string(), "rejected".to_string()]);
}

#[test]
fn test_field_to_validation() {
    assert_eq!(Field::read_only(4).to_validation(), Ok(4));
    assert_eq!(Field::saving(4).to_validation(), Ok(4));
    assert_eq!(editing().to_validation(), Ok("saved".to_string()));
    assert_eq!(
        Field::error(["taken", "too short"], 4).to_validation(),
        Err(vec!["taken".to_string(), "too short".to_string()])
    );
}

#[test]
fn test_field_from_result() {
    let accepted =
        Field::from_result("typed".to_string(), FieldResponse::accepted("Typed".to_string()));
    assert_eq!(accepted, Field::read_only("Typed".to_string()));

    let rejected = Field::from_result("typed".to_string(), FieldResponse::rejected(["taken"]));
    assert_eq!(rejected, Field::error(["taken"], "typed".to_string()));

    let accepted_without_data = FieldResponse {
        success: true,
        data: None,
        messages: Vec::new(),
    };
    assert_eq!(Field::from_result(7, accepted_without_data), Field::read_only(7));
}

#[test]
fn test_field_from_error() {
    let field = Field::from_error(7, ResourceError::transport("offline"));
    assert_eq!(field, Field::error(["request failed: offline"], 7));
}

#[tokio::test]
async fn test_field_map_promise() {
    let saved =
        Field::map_promise(7, async { Ok::<_, ResourceError>(FieldResponse::accepted(8)) }).await;
    assert_eq!(saved, Field::read_only(8));

    let failed = Field::map_promise(7, async {
        Err::<FieldResponse<i32>, _>(ResourceError::message("boom"))
    })
    .await;
    assert_eq!(failed, Field::error(["boom"], 7));
}

struct Label;

impl FieldPattern<i32> for Label {
    type Output = String;

    fn editable(self, value: &i32, temp: &i32) -> String {
        format!("editing {value} -> {temp}")
    }

    fn read_only(self, value: &i32) -> String {
        format!("showing {value}")
    }

    fn saving(self, value: &i32) -> String {
        format!("saving {value}")
    }

    fn error(self, messages: &[String], value: &i32) -> String {
        format!("{value} rejected: {}", messages.join("; "))
    }
}

#[test]
fn test_field_match_with() {
    assert_eq!(Field::editable_with(1, 2).match_with(Label), "editing 1 -> 2");
    assert_eq!(Field::read_only(1).match_with(Label), "showing 1");
    assert_eq!(Field::saving(1).match_with(Label), "saving 1");
    assert_eq!(Field::error(["taken"], 1).match_with(Label), "1 rejected: taken");
}

#[test]
fn test_field_save_cycle() {
    let field = Field::read_only("old".to_string())
        .edit()
        .map(|_| "new".to_string())
        .save();
    assert_eq!(field, Field::saving("new".to_string()));

    let settled = Field::from_result(field.into_value(), FieldResponse::rejected(["taken"]));
    assert!(settled.is_error());
    assert_eq!(settled.revert(), Field::read_only("new".to_string()));
}

#[cfg(feature = "serde")]
#[test]
fn test_field_response_serde_defaults() {
    let response: FieldResponse<String> = serde_json::from_str(r#"{"success": false}"#).unwrap();
    assert_eq!(response, FieldResponse::rejected(Vec::<String>::new()));
}
