mod inline_format_test;
mod remote_file_state_test;
