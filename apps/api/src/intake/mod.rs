// Input side of the form: the uploaded resume, the job description text, and
// the multipart reader that feeds both from an HTTP request.

pub mod form;
pub mod job_description;
pub mod resume;
