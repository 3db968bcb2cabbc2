use crate::error::{Error, WebErrorKind};
use axum::{
    extract::{FromRequest, Multipart, Request},
    http::header,
    Form,
};
use log::*;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Form fields sent either as `application/x-www-form-urlencoded` or as
/// `multipart/form-data` (what a browser `FormData` body is posted as).
pub(crate) struct FormData<T>(pub T);

impl<T, S> FromRequest<S> for FormData<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_multipart = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if !is_multipart {
            let Form(params) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rejection| input_error(rejection.body_text()))?;
            return Ok(FormData(params));
        }

        let mut multipart = Multipart::from_request(req, state)
            .await
            .map_err(|rejection| input_error(rejection.body_text()))?;

        // Only text fields are expected; each named field becomes a string.
        let mut fields = Map::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| input_error(e.body_text()))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let value = field.text().await.map_err(|e| input_error(e.body_text()))?;
            fields.insert(name, Value::String(value));
        }

        serde_json::from_value(Value::Object(fields))
            .map(FormData)
            .map_err(|e| input_error(e.to_string()))
    }
}

fn input_error(detail: String) -> Error {
    debug!("Rejected form input: {detail}");
    Error::Web(WebErrorKind::Input(detail))
}
