pub(crate) mod form_data;
