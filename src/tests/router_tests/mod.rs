mod orders_flow_tests;
