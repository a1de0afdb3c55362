mod endpoint_config_tests;
