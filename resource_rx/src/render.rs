use crate::{Field, FieldPattern, MergeParams, Resource, ResourcePattern};

/// Standing message handed to the `Empty` branch of a [`ResourceView`].
pub const NO_RESULTS_MESSAGE: &str = "No results were found";

#[derive(Debug, Clone, Copy)]
pub struct EmptyView<'a, P, M> {
    pub params: &'a P,
    pub meta: Option<&'a M>,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct DataView<'a, T, P, M> {
    pub value: &'a T,
    pub params: &'a P,
    pub meta: Option<&'a M>,
}

#[derive(Debug, Clone, Copy)]
pub struct ErrorView<'a, P, M> {
    pub messages: &'a [String],
    pub params: &'a P,
    pub meta: Option<&'a M>,
}

/// A presentation for each [`Resource`] variant.
///
/// The UI layer implements this; `Output` is whatever it renders to (a widget,
/// a string, a virtual node). `Pr` is the caller's extra properties, already
/// merged for the variant being rendered.
pub trait ResourceView<T, P, M, Pr> {
    type Output;

    fn query(&self, props: Pr) -> Self::Output;

    fn empty(&self, empty: EmptyView<'_, P, M>, props: Pr) -> Self::Output;

    fn data(&self, data: DataView<'_, T, P, M>, props: Pr) -> Self::Output;

    fn error(&self, error: ErrorView<'_, P, M>, props: Pr) -> Self::Output;
}

/// Per-variant props, merged over the base props of a [`ResourceRender`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchingProps<Pr> {
    pub query: Pr,
    pub empty: Pr,
    pub data: Pr,
    pub error: Pr,
}

/// Picks the [`ResourceView`] branch for a resource and feeds it its payload.
#[derive(Debug, Clone)]
pub struct ResourceRender<'v, V, Pr> {
    view: &'v V,
    props: Pr,
    matching: Option<MatchingProps<Pr>>,
}

impl<'v, V, Pr> ResourceRender<'v, V, Pr>
where
    Pr: MergeParams + Clone,
{
    pub fn new(view: &'v V, props: Pr) -> Self {
        ResourceRender {
            view,
            props,
            matching: None,
        }
    }

    pub fn with_matching(self, matching: MatchingProps<Pr>) -> Self {
        ResourceRender {
            matching: Some(matching),
            ..self
        }
    }

    pub fn render<T, P, M>(
        &self,
        resource: &Resource<T, P, M>,
    ) -> <V as ResourceView<T, P, M, Pr>>::Output
    where
        V: ResourceView<T, P, M, Pr>,
    {
        resource.match_with(RenderResource { render: self })
    }

    fn props_for(&self, pick: impl FnOnce(&MatchingProps<Pr>) -> &Pr) -> Pr {
        match &self.matching {
            Some(matching) => self.props.clone().merged(pick(matching).clone()),
            None => self.props.clone(),
        }
    }
}

struct RenderResource<'r, 'v, V, Pr> {
    render: &'r ResourceRender<'v, V, Pr>,
}

impl<T, P, M, V, Pr> ResourcePattern<T, P, M> for RenderResource<'_, '_, V, Pr>
where
    V: ResourceView<T, P, M, Pr>,
    Pr: MergeParams + Clone,
{
    type Output = V::Output;

    fn query(self, _params: &P, _meta: Option<&M>) -> V::Output {
        let props = self.render.props_for(|matching| &matching.query);
        self.render.view.query(props)
    }

    fn empty(self, params: &P, meta: Option<&M>) -> V::Output {
        let props = self.render.props_for(|matching| &matching.empty);
        let empty = EmptyView {
            params,
            meta,
            message: NO_RESULTS_MESSAGE,
        };
        self.render.view.empty(empty, props)
    }

    fn data(self, value: &T, params: &P, meta: Option<&M>) -> V::Output {
        let props = self.render.props_for(|matching| &matching.data);
        let data = DataView {
            value,
            params,
            meta,
        };
        self.render.view.data(data, props)
    }

    fn error(self, messages: &[String], params: &P, meta: Option<&M>) -> V::Output {
        let props = self.render.props_for(|matching| &matching.error);
        let error = ErrorView {
            messages,
            params,
            meta,
        };
        self.render.view.error(error, props)
    }
}

/// A presentation for each [`Field`] variant.
pub trait FieldView<T, Pr> {
    type Output;

    fn editing(&self, value: &T, temp: &T, props: Pr) -> Self::Output;

    fn read_only(&self, value: &T, props: Pr) -> Self::Output;

    fn saving(&self, value: &T, props: Pr) -> Self::Output;

    fn error(&self, messages: &[String], value: &T, props: Pr) -> Self::Output;
}

#[derive(Debug, Clone)]
pub struct FieldRender<'v, V, Pr> {
    view: &'v V,
    props: Pr,
}

impl<'v, V, Pr: Clone> FieldRender<'v, V, Pr> {
    pub fn new(view: &'v V, props: Pr) -> Self {
        FieldRender { view, props }
    }

    pub fn render<T>(&self, field: &Field<T>) -> <V as FieldView<T, Pr>>::Output
    where
        V: FieldView<T, Pr>,
    {
        field.match_with(RenderField { render: self })
    }
}

struct RenderField<'r, 'v, V, Pr> {
    render: &'r FieldRender<'v, V, Pr>,
}

impl<T, V, Pr> FieldPattern<T> for RenderField<'_, '_, V, Pr>
where
    V: FieldView<T, Pr>,
    Pr: Clone,
{
    type Output = V::Output;

    fn editable(self, value: &T, temp: &T) -> V::Output {
        self.render.view.editing(value, temp, self.render.props.clone())
    }

    fn read_only(self, value: &T) -> V::Output {
        self.render.view.read_only(value, self.render.props.clone())
    }

    fn saving(self, value: &T) -> V::Output {
        self.render.view.saving(value, self.render.props.clone())
    }

    fn error(self, messages: &[String], value: &T) -> V::Output {
        self.render.view.error(messages, value, self.render.props.clone())
    }
}

/// A presentation for the outcome of [`Field::to_validation`].
pub trait ValidationView<T, Pr> {
    type Output;

    fn success(&self, value: &T, props: Pr) -> Self::Output;

    fn failure(&self, messages: &[String], props: Pr) -> Self::Output;
}

#[derive(Debug, Clone)]
pub struct ValidationRender<'v, V, Pr> {
    view: &'v V,
    props: Pr,
}

impl<'v, V, Pr: Clone> ValidationRender<'v, V, Pr> {
    pub fn new(view: &'v V, props: Pr) -> Self {
        ValidationRender { view, props }
    }

    pub fn render<T>(
        &self,
        validation: &Result<T, Vec<String>>,
    ) -> <V as ValidationView<T, Pr>>::Output
    where
        V: ValidationView<T, Pr>,
    {
        match validation {
            Ok(value) => self.view.success(value, self.props.clone()),
            Err(messages) => self.view.failure(messages, self.props.clone()),
        }
    }

    /// Validates `field` and renders the outcome.
    pub fn render_field<T>(&self, field: &Field<T>) -> <V as ValidationView<T, Pr>>::Output
    where
        V: ValidationView<T, Pr>,
        T: Clone,
    {
        self.render(&field.clone().to_validation())
    }
}
