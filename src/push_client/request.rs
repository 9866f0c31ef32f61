use serde::Serialize;

#[derive(Serialize)]
pub struct PushRequest<'a> {
    pub message: Message<'a>,
}

#[derive(Serialize)]
pub struct Message<'a> {
    pub token: &'a str,
    pub notification: Notification<'a>,
}

#[derive(Serialize)]
pub struct Notification<'a> {
    pub title: &'a str,
    pub body: &'a str,
}

impl<'a> PushRequest<'a> {
    pub fn new(token: &'a str, title: &'a str, body: &'a str) -> Self {
        Self {
            message: Message {
                token,
                notification: Notification { title, body },
            },
        }
    }
}
