mod query_hooks_tests;
mod query_parse_error_tests;
mod query_parser_property_tests;
mod query_token_stream_tests;
mod utils;
