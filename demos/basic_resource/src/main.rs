use crate::tracing_setup::tracing_init;
use futures::StreamExt;
use resource_rx::mock::MockEndpoint;
use resource_rx::{
    DataView, EmptyView, ErrorView, Field, FieldResponse, FieldStreamExt, RequestOptions,
    RequestStreamExt, Resource, ResourceError, ResourceRender, ResourceStore, ResourceStreamExt,
    ResourceView,
};
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod tracing_setup;

type Query = BTreeMap<String, String>;

type Users = Resource<Vec<String>, Query, ResourceError>;

struct Console;

impl ResourceView<Vec<String>, Query, ResourceError, ()> for Console {
    type Output = String;

    fn query(&self, _props: ()) -> String {
        "loading...".to_string()
    }

    fn empty(&self, empty: EmptyView<'_, Query, ResourceError>, _props: ()) -> String {
        format!("{} for {:?}", empty.message, empty.params)
    }

    fn data(
        &self,
        data: DataView<'_, Vec<String>, Query, ResourceError>,
        _props: (),
    ) -> String {
        format!("users: {}", data.value.join(", "))
    }

    fn error(&self, error: ErrorView<'_, Query, ResourceError>, _props: ()) -> String {
        format!("failed: {}", error.messages.join("; "))
    }
}

fn query(pairs: &[(&str, &str)]) -> Query {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_init();

    let endpoint =
        MockEndpoint::<Query, Option<Vec<String>>>::new().with_delay(Duration::from_millis(100));
    endpoint
        .push_ok(Some(vec!["ada".to_string(), "grace".to_string()]))
        .push_ok(None)
        .push_err(ResourceError::transport("502 Bad Gateway"))
        .push_ok(Some(vec!["linus".to_string()]));

    let view = Console;
    let render = ResourceRender::new(&view, ());

    info!("==========================================");
    info!("Store: fetch the pending query and render every state");
    let store = ResourceStore::with_options(
        Users::new_query(query(&[("role", "admin")])),
        RequestOptions::get().with_access_token("demo-token"),
    );
    let mock = endpoint.clone();
    store.fetch(move |request| mock.call(request))?;
    store
        .settled()
        .for_each(|users| {
            info!("{}", render.render(&users));
            async {}
        })
        .await;

    info!("==========================================");
    info!("Store: change the query, the next page is empty");
    store.update(query(&[("page", "2")]))?;
    let mock = endpoint.clone();
    store.fetch(move |request| mock.call(request))?;
    sleep(Duration::from_millis(150)).await;
    info!("{}", render.render(&store.await_resource().await?));

    info!("==========================================");
    warn!("Store: a cancelled fetch leaves the query pending");
    store.retry()?;
    let token = CancellationToken::new();
    let mock = endpoint.clone();
    store.fetch_cancellable(token.clone(), move |request| mock.call(request))?;
    sleep(Duration::from_millis(20)).await;
    token.cancel();
    sleep(Duration::from_millis(150)).await;
    info!("{}", render.render(&store.await_resource().await?));

    info!("==========================================");
    info!("Streams: queries in, settled resources out");
    let mock = endpoint.clone();
    let settled: Vec<Users> = futures::stream::iter(vec![
        Users::new_query(query(&[("role", "owner")])),
        Users::new_empty(query(&[])),
    ])
    .to_params()
    .with_options(|| RequestOptions::get().with_access_token("demo-token"))
    .make_request(move |request| mock.call(request))
    .collect()
    .await;
    for users in &settled {
        info!("{}", render.render(users));
    }

    info!("==========================================");
    info!("Field: edit, save and settle");
    let saves = MockEndpoint::<String, FieldResponse<String>>::new();
    saves
        .push_ok(FieldResponse::accepted("Ada Lovelace".to_string()))
        .push_ok(FieldResponse::rejected(["name is already taken"]));

    let first = Field::read_only("Ada".to_string())
        .edit()
        .map(|temp| format!("{temp} Lovelace"))
        .save();
    let second = Field::editable("Grace".to_string()).save();
    let mock = saves.clone();
    let fields: Vec<Field<String>> = futures::stream::iter(vec![first, second])
        .to_body()
        .with_options(RequestOptions::json_put)
        .make_field_request(move |request| mock.call(request))
        .collect()
        .await;
    for field in fields {
        match field.to_validation() {
            Ok(value) => info!("saved {value}"),
            Err(messages) => warn!("rejected: {}", messages.join(", ")),
        }
    }

    info!("Finish");
    Ok(())
}
