mod byte_order_tests;
