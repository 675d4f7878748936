mod cors;
mod invalid_json;
