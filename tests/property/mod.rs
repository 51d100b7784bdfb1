mod merge_idempotence;
