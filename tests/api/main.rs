mod directory;
mod dispatch;
mod health_check;
