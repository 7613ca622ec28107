mod minutes_service_test;
