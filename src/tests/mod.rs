mod web_tests;
