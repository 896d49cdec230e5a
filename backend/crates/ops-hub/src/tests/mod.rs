mod event;
mod heartbeat;
