mod records_test;
mod server_stdio_test;
mod sheets_test;
