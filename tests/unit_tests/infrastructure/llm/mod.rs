mod mock_llm_client_test;
