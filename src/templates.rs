use tera::Tera;

use crate::domain::Submission;

const CONTACT_HTML: &str = include_str!("../templates/contact.html");
const CONTACT_TEXT: &str = include_str!("../templates/contact.txt");

/// The two bodies of a relayed contact message.
pub struct ContactContent {
    pub html: String,
    pub text: String,
}

#[derive(serde::Serialize)]
struct ContactContext<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Renders submissions into the HTML and plain-text bodies of the outbound email.
/// Templates ending in `.html` are autoescaped by tera.
pub struct ContactTemplates(Tera);

impl ContactTemplates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("contact.html", CONTACT_HTML),
            ("contact.txt", CONTACT_TEXT),
        ])?;
        Ok(Self(tera))
    }

    pub fn render(&self, submission: &Submission) -> Result<ContactContent, tera::Error> {
        let context = tera::Context::from_serialize(ContactContext {
            name: submission.name.as_ref(),
            email: submission.email.as_ref(),
            subject: submission.subject.as_ref(),
            message: submission.message.as_ref(),
        })?;
        Ok(ContactContent {
            html: self.0.render("contact.html", &context)?,
            text: self.0.render("contact.txt", &context)?,
        })
    }
}
