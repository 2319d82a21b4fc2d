/// Where quote requests are addressed.
pub trait ContactProvider {
    fn recipient(&self) -> &str;
    fn business_name(&self) -> &str;
}
