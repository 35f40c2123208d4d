mod segment_tests;
