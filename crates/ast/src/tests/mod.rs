mod ast_test;
