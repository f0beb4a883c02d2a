pub mod session_code;
