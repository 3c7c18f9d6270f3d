
mod bridge_login_test;
mod http_test;
mod token_test;
