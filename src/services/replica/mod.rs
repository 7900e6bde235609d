pub mod replica_client;
