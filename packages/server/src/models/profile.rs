use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct ProfileView {
    /// Profile name, or the configured site owner name.
    pub name: String,
    pub direction: Option<String>,
    pub message: Option<String>,
    pub experience: Option<String>,
    pub awards: Option<String>,
    pub resume: Option<String>,
    pub resume_download: Option<String>,
    pub intro: Option<String>,
    pub images: Vec<String>,
}

/// Profile fields as editable strings; absent fields are empty.
#[derive(Serialize, Debug)]
pub struct ProfileEditView {
    pub name: String,
    pub direction: String,
    pub message: String,
    pub experience: String,
    pub awards: String,
    pub resume: Option<String>,
}
