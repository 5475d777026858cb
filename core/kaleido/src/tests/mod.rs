
mod chat_tests;
mod repl_tests;
